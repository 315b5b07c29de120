use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    #[error("cannot divide by zero")]
    DivisionByZero,
}

pub fn add(x: f64, y: f64) -> f64 {
    x + y
}

pub fn subtract(x: f64, y: f64) -> f64 {
    x - y
}

pub fn multiply(x: f64, y: f64) -> f64 {
    x * y
}

/// Divides `x` by `y`, refusing a zero divisor (either sign of zero).
pub fn divide(x: f64, y: f64) -> Result<f64, ArithmeticError> {
    if y == 0.0 {
        return Err(ArithmeticError::DivisionByZero);
    }
    Ok(x / y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add() {
        assert_eq!(add(2.0, 3.0), 5.0);
        assert_eq!(add(-1.0, 1.0), 0.0);
        assert_eq!(add(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_subtract() {
        assert_eq!(subtract(5.0, 3.0), 2.0);
        assert_eq!(subtract(0.0, 1.0), -1.0);
        assert_eq!(subtract(-1.0, -1.0), 0.0);
    }

    #[test]
    fn test_multiply() {
        assert_eq!(multiply(2.0, 3.0), 6.0);
        assert_eq!(multiply(0.0, 5.0), 0.0);
        assert_eq!(multiply(-2.0, 3.0), -6.0);
    }

    #[test]
    fn test_divide() {
        assert_eq!(divide(6.0, 3.0), Ok(2.0));
        assert_eq!(divide(5.0, 2.0), Ok(2.5));
        assert_eq!(divide(-6.0, -2.0), Ok(3.0));
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(divide(5.0, 0.0), Err(ArithmeticError::DivisionByZero));
        assert_eq!(divide(5.0, -0.0), Err(ArithmeticError::DivisionByZero));
    }
}
