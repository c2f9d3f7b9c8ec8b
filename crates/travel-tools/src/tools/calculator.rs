//! Expense calculator tools.

use async_trait::async_trait;
use serde_json::Value;

use crate::calculator::{format_number, Calculator};
use crate::error::ToolError;
use crate::tool::{object_schema, Tool, ToolArgs, ToolOutput};

/// Adds two numbers.
///
/// Output: `Result: 2 + 3 = 5`
#[derive(Debug, Default)]
pub struct AddNumbers {
    calculator: Calculator,
}

impl AddNumbers {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Tool for AddNumbers {
    fn name(&self) -> &str {
        "add_numbers"
    }

    fn description(&self) -> &str {
        "Add two numbers together"
    }

    fn parameters(&self) -> Value {
        object_schema(&[
            ("a", "number", "First number"),
            ("b", "number", "Second number"),
        ])
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let a = args.get_f64("a")?;
        let b = args.get_f64("b")?;
        let result = self.calculator.add(a, b);

        Ok(ToolOutput::success(format!(
            "Result: {} + {} = {}",
            format_number(a),
            format_number(b),
            format_number(result)
        )))
    }
}

/// Multiplies two numbers.
///
/// Output: `Result: 4 × 5 = 20`
#[derive(Debug, Default)]
pub struct MultiplyNumbers {
    calculator: Calculator,
}

impl MultiplyNumbers {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Tool for MultiplyNumbers {
    fn name(&self) -> &str {
        "multiply_numbers"
    }

    fn description(&self) -> &str {
        "Multiply two numbers"
    }

    fn parameters(&self) -> Value {
        object_schema(&[
            ("a", "number", "First number"),
            ("b", "number", "Second number"),
        ])
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let a = args.get_f64("a")?;
        let b = args.get_f64("b")?;
        let result = self.calculator.multiply(a, b);

        Ok(ToolOutput::success(format!(
            "Result: {} × {} = {}",
            format_number(a),
            format_number(b),
            format_number(result)
        )))
    }
}

/// Percentage of a value.
///
/// Output: `Result: 15% of 200 = 30`
#[derive(Debug, Default)]
pub struct CalculatePercentage {
    calculator: Calculator,
}

impl CalculatePercentage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Tool for CalculatePercentage {
    fn name(&self) -> &str {
        "calculate_percentage"
    }

    fn description(&self) -> &str {
        "Calculate percentage of a value"
    }

    fn parameters(&self) -> Value {
        object_schema(&[
            ("value", "number", "The base value"),
            ("percentage", "number", "Percentage to take, e.g. 15 for 15%"),
        ])
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let value = args.get_f64("value")?;
        let percentage = args.get_f64("percentage")?;
        let result = self.calculator.percentage(value, percentage);

        Ok(ToolOutput::success(format!(
            "Result: {}% of {} = {}",
            format_number(percentage),
            format_number(value),
            format_number(result)
        )))
    }
}

/// Sum of a comma-separated list of expenses.
///
/// Output: `Total expenses: 400`
#[derive(Debug, Default)]
pub struct CalculateTotalExpenses {
    calculator: Calculator,
}

impl CalculateTotalExpenses {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Tool for CalculateTotalExpenses {
    fn name(&self) -> &str {
        "calculate_total_expenses"
    }

    fn description(&self) -> &str {
        "Calculate total expenses from a comma-separated string of numbers"
    }

    fn parameters(&self) -> Value {
        object_schema(&[(
            "expenses",
            "string",
            "Comma-separated amounts, e.g. \"1200,350.5,80\"",
        )])
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let expenses = args
            .get_list("expenses")?
            .iter()
            .map(|item| {
                item.parse::<f64>().map_err(|_| ToolError::InvalidParameter {
                    name: "expenses".to_string(),
                    reason: format!("'{}' is not a number", item),
                })
            })
            .collect::<Result<Vec<f64>, ToolError>>()?;

        let total = self.calculator.total_expense(&expenses);
        Ok(ToolOutput::success(format!(
            "Total expenses: {}",
            format_number(total)
        )))
    }
}

/// Splits a total cost across a group.
///
/// Output: `Cost per person: 100 (Total: 300, People: 3)`
#[derive(Debug, Default)]
pub struct CalculatePerPersonCost {
    calculator: Calculator,
}

impl CalculatePerPersonCost {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Tool for CalculatePerPersonCost {
    fn name(&self) -> &str {
        "calculate_per_person_cost"
    }

    fn description(&self) -> &str {
        "Calculate cost per person from total cost and number of people"
    }

    fn parameters(&self) -> Value {
        object_schema(&[
            ("total_cost", "number", "Total cost of the trip"),
            ("num_people", "integer", "Number of people sharing the cost"),
        ])
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let total_cost = args.get_f64("total_cost")?;
        let num_people = args.get_integer("num_people")?;
        let cost = self.calculator.per_person_cost(total_cost, num_people)?;

        Ok(ToolOutput::success(format!(
            "Cost per person: {} (Total: {}, People: {})",
            format_number(cost),
            format_number(total_cost),
            num_people
        )))
    }
}

/// Spreads a budget over the days of a trip.
///
/// Output: `Daily budget: 200 (Total budget: 1000, Days: 5)`
#[derive(Debug, Default)]
pub struct CalculateDailyBudget {
    calculator: Calculator,
}

impl CalculateDailyBudget {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Tool for CalculateDailyBudget {
    fn name(&self) -> &str {
        "calculate_daily_budget"
    }

    fn description(&self) -> &str {
        "Calculate daily budget from total budget and number of days"
    }

    fn parameters(&self) -> Value {
        object_schema(&[
            ("total_budget", "number", "Total trip budget"),
            ("num_days", "integer", "Number of days of the trip"),
        ])
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let total_budget = args.get_f64("total_budget")?;
        let num_days = args.get_integer("num_days")?;
        let daily = self.calculator.daily_budget(total_budget, num_days)?;

        Ok(ToolOutput::success(format!(
            "Daily budget: {} (Total budget: {}, Days: {})",
            format_number(daily),
            format_number(total_budget),
            num_days
        )))
    }
}
