use sqlx::FromRow;

#[derive(Clone, Debug, PartialEq, FromRow)]
pub struct SettingModel {
    pub key: String,
    pub value: String,
    pub updated_at: String,
}
