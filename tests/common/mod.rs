use std::io::Write as _;
use std::sync::{LazyLock, Mutex};

use dynamic_connectivity::sequence::AggregatedData;
use flexi_logger::{Logger, LoggerHandle};

pub mod slow_sequence;

/// Sum aggregate over i32 payloads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggSum(pub i32);

impl AggregatedData for AggSum {
    type Data = i32;

    fn from(data: &Self::Data) -> Self {
        Self(*data)
    }

    fn merge(self, right: Self) -> Self {
        Self(self.0 + right.0)
    }
}

impl PartialEq<i32> for AggSum {
    fn eq(&self, other: &i32) -> bool {
        self.0 == *other
    }
}

/// Order-sensitive aggregate: the decimal digits of a range, concatenated.
/// Useful to catch splits and joins that scramble element order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggDigits {
    pub value: u64,
    pub digits: u32,
}

impl AggregatedData for AggDigits {
    type Data = i32;

    fn from(data: &Self::Data) -> Self {
        Self {
            value: *data as u64,
            digits: 1,
        }
    }

    fn merge(self, right: Self) -> Self {
        Self {
            value: self.value * 10u64.pow(right.digits) + right.value,
            digits: self.digits + right.digits,
        }
    }
}

impl PartialEq<u64> for AggDigits {
    fn eq(&self, other: &u64) -> bool {
        self.value == *other
    }
}

#[allow(dead_code)]
pub static LOGGER: LazyLock<Mutex<LoggerHandle>> = LazyLock::new(|| {
    Mutex::new(
        Logger::try_with_env_or_str("info")
            .unwrap()
            .write_mode(flexi_logger::WriteMode::SupportCapture)
            .log_to_stdout()
            .format(|w, now, record| {
                write!(
                    w,
                    "{} [{}] {}",
                    now.format("%H:%M:%S"),
                    &record.level().as_str()[0..1],
                    record.args(),
                )
            })
            .start()
            .unwrap(),
    )
});

#[allow(dead_code)]
pub fn init_logger() {
    let _ = &*LOGGER;
}
