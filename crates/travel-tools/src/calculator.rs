//! Expense arithmetic used by the calculator tools.

use thiserror::Error;

/// Validation failures of the expense calculator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculatorError {
    /// Divisor was zero.
    #[error("Cannot divide by zero")]
    DivisionByZero,

    /// Group size was zero or negative.
    #[error("Number of people must be greater than 0")]
    InvalidPeopleCount,

    /// Trip length was zero or negative.
    #[error("Number of days must be greater than 0")]
    InvalidDayCount,
}

/// Pure arithmetic for travel expense planning.
#[derive(Debug, Clone, Copy, Default)]
pub struct Calculator;

impl Calculator {
    /// Create a new calculator.
    pub fn new() -> Self {
        Self
    }

    pub fn add(&self, a: f64, b: f64) -> f64 {
        a + b
    }

    pub fn subtract(&self, a: f64, b: f64) -> f64 {
        a - b
    }

    pub fn multiply(&self, a: f64, b: f64) -> f64 {
        a * b
    }

    pub fn divide(&self, a: f64, b: f64) -> Result<f64, CalculatorError> {
        if b == 0.0 {
            return Err(CalculatorError::DivisionByZero);
        }
        Ok(a / b)
    }

    /// `percentage` percent of `value`.
    pub fn percentage(&self, value: f64, percentage: f64) -> f64 {
        (value * percentage) / 100.0
    }

    /// Sum of a list of expenses.
    pub fn total_expense(&self, expenses: &[f64]) -> f64 {
        expenses.iter().sum()
    }

    pub fn per_person_cost(&self, total_cost: f64, num_people: i64) -> Result<f64, CalculatorError> {
        if num_people <= 0 {
            return Err(CalculatorError::InvalidPeopleCount);
        }
        Ok(total_cost / num_people as f64)
    }

    pub fn daily_budget(&self, total_budget: f64, num_days: i64) -> Result<f64, CalculatorError> {
        if num_days <= 0 {
            return Err(CalculatorError::InvalidDayCount);
        }
        Ok(total_budget / num_days as f64)
    }

    /// Compound growth: `principal * (1 + rate/100)^time`.
    pub fn compound(&self, principal: f64, rate: f64, time: f64) -> f64 {
        principal * (1.0 + rate / 100.0).powf(time)
    }
}

/// Render a number the way the tools print it: integers without decimals.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}
