pub(crate) mod date;
pub(crate) mod timezone;

pub(crate) use date::{date_key, parse_date_key, parse_timestamp_ms};
pub(crate) use timezone::Timezone;
