use crate::utils::error::{AppError, Result};

pub fn calculate_sum(a: i64, b: i64) -> Result<i64> {
    a.checked_add(b)
        .ok_or_else(|| AppError::processing(format!("{} + {} overflows", a, b)))
}

/// Sorts `numbers` in place, then returns their sum.
pub fn process_list(numbers: &mut [i64]) -> Result<i64> {
    numbers.sort_unstable();
    numbers.iter().try_fold(0i64, |acc, &n| calculate_sum(acc, n))
}

/// Integer counter mutated by `add`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Accumulator {
    value: i64,
}

impl Accumulator {
    pub fn new(initial_value: i64) -> Self {
        Self {
            value: initial_value,
        }
    }

    /// 溢位時保留原值並回傳錯誤
    pub fn add(&mut self, amount: i64) -> Result<i64> {
        self.value = calculate_sum(self.value, amount)?;
        tracing::debug!(amount, value = self.value, "accumulator updated");
        Ok(self.value)
    }

    pub fn value(&self) -> i64 {
        self.value
    }
}
