#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub menu_today: i64,
    pub served_today: i64,
    pub written_off_today: i64,
    pub orders_new: i64,
    pub orders_approved: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockLevel {
    pub name: String,
    pub available: i64,
}
