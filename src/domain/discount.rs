//! Discount code applicability and amount computation

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::{
    error::{AppError, AppResult},
    models::discount::{DiscountCode, DiscountType},
};

/// Check that a code can be applied right now.
///
/// A code is applicable when it is active, `now` falls inside its validity
/// window and its usage cap (if any) has not been reached. The cap check is
/// advisory here; the authoritative check is the conditional increment that
/// rides the booking transaction.
pub fn check_applicable(code: &DiscountCode, now: DateTime<Utc>) -> AppResult<()> {
    if !code.active {
        return Err(AppError::InapplicableCode(format!(
            "code {} is inactive",
            code.code
        )));
    }
    if now < code.valid_from || now > code.valid_until {
        return Err(AppError::InapplicableCode(format!(
            "code {} is outside its validity window",
            code.code
        )));
    }
    if let Some(max) = code.max_uses {
        if code.current_uses >= max {
            return Err(AppError::UsageCapExceeded(format!(
                "code {} has reached its usage cap ({}/{})",
                code.code, code.current_uses, max
            )));
        }
    }
    Ok(())
}

/// Discount amount for a subtotal, clamped to `[0, subtotal]` so the
/// resulting final amount stays within `[0, subtotal]` whatever the stored
/// value is.
pub fn discount_amount(discount_type: DiscountType, value: Decimal, subtotal: Decimal) -> Decimal {
    let amount = match discount_type {
        DiscountType::Percentage => subtotal * value / Decimal::from(100),
        DiscountType::Fixed => value,
    };
    amount.clamp(Decimal::ZERO, subtotal).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn code(active: bool, max_uses: Option<i32>, current_uses: i32) -> DiscountCode {
        DiscountCode {
            id: 1,
            code: "SUMMER10".to_string(),
            discount_type: DiscountType::Percentage,
            value: Decimal::from(10),
            valid_from: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
            valid_until: Utc.with_ymd_and_hms(2025, 8, 31, 23, 59, 59).unwrap(),
            max_uses,
            current_uses,
            active,
            created_at: Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_applicable_within_window() {
        let now = Utc.with_ymd_and_hms(2025, 7, 15, 12, 0, 0).unwrap();
        assert!(check_applicable(&code(true, Some(100), 5), now).is_ok());
    }

    #[test]
    fn test_inactive_rejected() {
        let now = Utc.with_ymd_and_hms(2025, 7, 15, 12, 0, 0).unwrap();
        assert!(matches!(
            check_applicable(&code(false, None, 0), now),
            Err(AppError::InapplicableCode(_))
        ));
    }

    #[test]
    fn test_outside_window_rejected() {
        let now = Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap();
        assert!(matches!(
            check_applicable(&code(true, None, 0), now),
            Err(AppError::InapplicableCode(_))
        ));
    }

    #[test]
    fn test_cap_reached_rejected_even_inside_window() {
        let now = Utc.with_ymd_and_hms(2025, 7, 15, 12, 0, 0).unwrap();
        assert!(matches!(
            check_applicable(&code(true, Some(3), 3), now),
            Err(AppError::UsageCapExceeded(_))
        ));
    }

    #[test]
    fn test_unlimited_uses() {
        let now = Utc.with_ymd_and_hms(2025, 7, 15, 12, 0, 0).unwrap();
        assert!(check_applicable(&code(true, None, 100_000), now).is_ok());
    }

    #[test]
    fn test_percentage_amount() {
        let amount = discount_amount(
            DiscountType::Percentage,
            Decimal::from(10),
            Decimal::new(25000, 2),
        );
        assert_eq!(amount, Decimal::new(2500, 2));
    }

    #[test]
    fn test_fixed_amount_clamped_to_subtotal() {
        let amount = discount_amount(
            DiscountType::Fixed,
            Decimal::from(500),
            Decimal::from(120),
        );
        assert_eq!(amount, Decimal::from(120));
    }

    #[test]
    fn test_negative_value_never_surcharges() {
        let amount = discount_amount(
            DiscountType::Fixed,
            Decimal::from(-50),
            Decimal::from(120),
        );
        assert_eq!(amount, Decimal::ZERO);

        let amount = discount_amount(
            DiscountType::Percentage,
            Decimal::from(-10),
            Decimal::from(120),
        );
        assert_eq!(amount, Decimal::ZERO);
    }

    #[test]
    fn test_fixed_amount_below_subtotal() {
        let amount = discount_amount(
            DiscountType::Fixed,
            Decimal::from(30),
            Decimal::from(120),
        );
        assert_eq!(amount, Decimal::from(30));
    }
}
