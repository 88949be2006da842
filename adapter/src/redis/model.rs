use shared::error::AppResult;

pub trait RedisKey {
    type Value: RedisValue + TryFrom<String, Error = shared::error::AppError>;

    fn inner(&self) -> String;
}

pub trait RedisValue {
    fn inner(&self) -> String;
}

pub(crate) fn decode<K: RedisKey>(raw: Option<String>) -> AppResult<Option<K::Value>> {
    raw.map(K::Value::try_from).transpose()
}
