use super::Recipient;
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateNotice {
    pub title: String,
    pub text: Option<String>,
    pub sender: String,
    pub recipient: Recipient,
}
