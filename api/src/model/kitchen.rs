use super::{
    form::{lenient_i32, lenient_id, text},
    menu::MenuItemResponse,
    user::StudentSummary,
};
use chrono::{DateTime, NaiveDate, Utc};
use kernel::model::{
    accounting::{
        event::{ServeMeal, WriteOffPortions},
        PayType, Serve, WriteOff,
    },
    id::{MenuItemId, ServeId, UserId, WriteOffId},
    menu::{MealType, MenuItem},
    user::User,
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};

fn incomplete() -> AppError {
    AppError::UnprocessableEntity("fill in all fields correctly".into())
}

#[derive(Deserialize)]
pub struct ServeRequest {
    #[serde(default, deserialize_with = "lenient_id")]
    pub student_id: Option<UserId>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub item_id: Option<MenuItemId>,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub count: Option<i32>,
    #[serde(default, deserialize_with = "text")]
    pub pay_type: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub comment: Option<String>,
}

impl ServeRequest {
    pub fn into_event(self, staff: &User, today: NaiveDate) -> AppResult<ServeMeal> {
        let (Some(student_id), Some(menu_item_id)) = (self.student_id, self.item_id) else {
            return Err(incomplete());
        };
        Ok(ServeMeal::new(
            student_id,
            menu_item_id,
            self.count.unwrap_or(1),
            PayType::from_form(self.pay_type.as_deref())?,
            self.comment,
            staff.id,
            staff.name.clone(),
            today,
        ))
    }
}

#[derive(Deserialize)]
pub struct WriteOffRequest {
    #[serde(default, deserialize_with = "lenient_id")]
    pub item_id: Option<MenuItemId>,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub count: Option<i32>,
    #[serde(default, deserialize_with = "text")]
    pub reason: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub comment: Option<String>,
}

impl WriteOffRequest {
    pub fn into_event(self, staff: &User, today: NaiveDate) -> AppResult<WriteOffPortions> {
        let (Some(menu_item_id), Some(count), Some(reason)) = (self.item_id, self.count, self.reason)
        else {
            return Err(incomplete());
        };
        Ok(WriteOffPortions::new(
            menu_item_id,
            count,
            reason,
            self.comment,
            staff.id,
            staff.name.clone(),
            today,
        ))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServeResponse {
    pub id: ServeId,
    pub student_id: UserId,
    pub student_name: String,
    pub item_name: String,
    pub meal_type: MealType,
    pub count: i32,
    pub pay_type: PayType,
    pub amount: i64,
    pub comment: Option<String>,
    pub served_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<Serve> for ServeResponse {
    fn from(value: Serve) -> Self {
        Self {
            id: value.id,
            student_id: value.student_id,
            student_name: value.student_name,
            item_name: value.item_name,
            meal_type: value.meal_type,
            count: value.count,
            pay_type: value.pay_type,
            amount: value.amount,
            comment: value.comment,
            served_on: value.served_on,
            created_at: value.created_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteOffResponse {
    pub id: WriteOffId,
    pub item_name: String,
    pub count: i32,
    pub reason: String,
    pub comment: Option<String>,
    pub staff_name: Option<String>,
    pub written_off_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<WriteOff> for WriteOffResponse {
    fn from(value: WriteOff) -> Self {
        Self {
            id: value.id,
            item_name: value.item_name,
            count: value.count,
            reason: value.reason,
            comment: value.comment,
            staff_name: value.staff_name,
            written_off_on: value.written_off_on,
            created_at: value.created_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServePageResponse {
    pub students: Vec<StudentSummary>,
    pub menu: Vec<MenuItemResponse>,
    pub history: Vec<ServeResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ServePageResponse {
    pub fn new(
        students: Vec<User>,
        menu: Vec<MenuItem>,
        history: Vec<Serve>,
        message: Option<String>,
    ) -> Self {
        Self {
            students: students.into_iter().map(StudentSummary::from).collect(),
            menu: menu.into_iter().map(MenuItemResponse::from).collect(),
            history: history.into_iter().map(ServeResponse::from).collect(),
            message,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteOffPageResponse {
    pub menu: Vec<MenuItemResponse>,
    pub history: Vec<WriteOffResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl WriteOffPageResponse {
    pub fn new(menu: Vec<MenuItem>, history: Vec<WriteOff>, message: Option<String>) -> Self {
        Self {
            menu: menu.into_iter().map(MenuItemResponse::from).collect(),
            history: history.into_iter().map(WriteOffResponse::from).collect(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::role::Role;

    fn cook() -> User {
        User {
            id: UserId::new(),
            login: "cook".into(),
            name: "Cook".into(),
            work: "Kitchen".into(),
            role: Role::Cook,
            benefit: None,
            allergy: None,
            balance: 0,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn serve_defaults_to_one_portion_paid_from_balance() {
        let body = format!("student_id={}&item_id={}", UserId::new(), MenuItemId::new());
        let req: ServeRequest = serde_urlencoded::from_str(&body).unwrap();
        let event = req.into_event(&cook(), today()).unwrap();
        assert_eq!(event.count, 1);
        assert_eq!(event.pay_type, PayType::Balance);
        assert_eq!(event.staff_name, "Cook");
    }

    #[test]
    fn serve_needs_both_ids() {
        let req: ServeRequest =
            serde_urlencoded::from_str("student_id=nobody&item_id=&count=2").unwrap();
        assert!(matches!(
            req.into_event(&cook(), today()),
            Err(AppError::UnprocessableEntity(_))
        ));
    }

    #[test]
    fn serve_rejects_unknown_payment_types() {
        let body = format!(
            "student_id={}&item_id={}&pay_type=voucher",
            UserId::new(),
            MenuItemId::new()
        );
        let req: ServeRequest = serde_urlencoded::from_str(&body).unwrap();
        assert!(req.into_event(&cook(), today()).is_err());
    }

    #[test]
    fn write_off_needs_count_and_reason() {
        let body = format!("item_id={}&count=2", MenuItemId::new());
        let req: WriteOffRequest = serde_urlencoded::from_str(&body).unwrap();
        assert!(req.into_event(&cook(), today()).is_err());

        let body = format!("item_id={}&count=2&reason=spoiled", MenuItemId::new());
        let req: WriteOffRequest = serde_urlencoded::from_str(&body).unwrap();
        let event = req.into_event(&cook(), today()).unwrap();
        assert_eq!(event.reason, "spoiled");
    }
}
