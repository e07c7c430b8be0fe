use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub monthly_limit: Decimal,
}
