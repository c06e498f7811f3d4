//! Payoff simulation for an operation scenario
use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationInput {
    pub entry_price: f64,
    pub exit_price: f64,
    pub quantity: f64,
    /// Annual rate in percent, e.g. `Some(12.5)`.
    pub interest_rate: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub gross_result: f64,
    /// Percentage over the invested amount.
    pub estimated_return: f64,
    pub scenario: Scenario,
}

/// Computes the gross result and estimated return for an exit scenario.
/// Entry price and quantity must be positive so the invested amount is
/// well defined.
pub fn simulate(input: &SimulationInput) -> Result<SimulationResult, ValidationError> {
    if !(input.entry_price > 0.0) {
        return Err(ValidationError::MissingRequiredField("entryPrice"));
    }
    if !input.exit_price.is_finite() {
        return Err(ValidationError::MissingRequiredField("exitPrice"));
    }
    if !(input.quantity > 0.0) {
        return Err(ValidationError::MissingRequiredField("quantity"));
    }

    let gross_result = (input.exit_price - input.entry_price) * input.quantity;
    let invested = input.entry_price * input.quantity;
    let mut estimated_return = gross_result / invested * 100.0;

    let rate = input.interest_rate.unwrap_or(0.0) / 100.0;
    if rate > 0.0 {
        estimated_return += rate * 100.0;
    }

    let scenario = if estimated_return > 0.0 {
        Scenario::Positive
    } else if estimated_return < 0.0 {
        Scenario::Negative
    } else {
        Scenario::Neutral
    };

    Ok(SimulationResult {
        gross_result,
        estimated_return,
        scenario,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profitable_exit_is_positive() {
        let result = simulate(&SimulationInput {
            entry_price: 100.0,
            exit_price: 110.0,
            quantity: 1_000.0,
            interest_rate: None,
        })
        .unwrap();

        assert_eq!(result.gross_result, 10_000.0);
        assert_eq!(result.estimated_return, 10.0);
        assert_eq!(result.scenario, Scenario::Positive);
    }

    #[test]
    fn interest_rate_adds_to_the_return() {
        let result = simulate(&SimulationInput {
            entry_price: 100.0,
            exit_price: 100.0,
            quantity: 10.0,
            interest_rate: Some(5.0),
        })
        .unwrap();

        assert_eq!(result.estimated_return, 5.0);
        assert_eq!(result.scenario, Scenario::Positive);
    }

    #[test]
    fn flat_exit_without_rate_is_neutral() {
        let result = simulate(&SimulationInput {
            entry_price: 50.0,
            exit_price: 50.0,
            quantity: 10.0,
            interest_rate: None,
        })
        .unwrap();

        assert_eq!(result.gross_result, 0.0);
        assert_eq!(result.scenario, Scenario::Neutral);
    }

    #[test]
    fn losing_exit_is_negative() {
        let result = simulate(&SimulationInput {
            entry_price: 100.0,
            exit_price: 90.0,
            quantity: 10.0,
            interest_rate: None,
        })
        .unwrap();

        assert_eq!(result.scenario, Scenario::Negative);
    }

    #[test]
    fn rejects_non_positive_mandatory_inputs() {
        let base = SimulationInput {
            entry_price: 100.0,
            exit_price: 110.0,
            quantity: 10.0,
            interest_rate: None,
        };

        let mut input = base.clone();
        input.entry_price = 0.0;
        assert_eq!(
            simulate(&input).unwrap_err(),
            ValidationError::MissingRequiredField("entryPrice")
        );

        let mut input = base.clone();
        input.quantity = -1.0;
        assert_eq!(
            simulate(&input).unwrap_err(),
            ValidationError::MissingRequiredField("quantity")
        );

        let mut input = base;
        input.exit_price = f64::NAN;
        assert!(simulate(&input).is_err());
    }
}
