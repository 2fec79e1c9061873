//! Order form handling for the "Add New Order" dialog.
//!
//! Validates the raw form input field by field so each message can be shown
//! next to its input, and turns a valid form into the insert payload.

use shared::{CreateOrderRequest, OrderFormErrors, OrderFormValidation};

use crate::domain::models::order::{parse_due_date, NewOrder, Order, OrderStatus, OrderValidationError};

const MIN_PHONE_DIGITS: usize = 10;
const MAX_PHONE_DIGITS: usize = 15;

#[derive(Clone, Default)]
pub struct OrderFormService;

impl OrderFormService {
    pub fn new() -> Self {
        Self
    }

    /// Validate every field of the form; any error blocks submission
    pub fn validate(&self, request: &CreateOrderRequest) -> OrderFormValidation {
        let errors = OrderFormErrors {
            name: Self::validate_name(&request.name).err().map(|e| e.to_string()),
            price: Self::parse_price(&request.price).err().map(|e| e.to_string()),
            due_date: Self::validate_due_date(&request.due_date).err().map(|e| e.to_string()),
            phone: Self::validate_phone(&request.phone).err().map(|e| e.to_string()),
        };

        OrderFormValidation {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Build the insert payload for a valid form, with a freshly generated
    /// order number. Returns the per-field errors otherwise.
    pub fn to_new_order(&self, request: &CreateOrderRequest) -> Result<NewOrder, OrderFormErrors> {
        let validation = self.validate(request);
        if !validation.is_valid {
            return Err(validation.errors);
        }

        match (
            Self::parse_price(&request.price),
            Self::validate_due_date(&request.due_date),
        ) {
            (Ok(price), Ok(due_date)) => Ok(NewOrder {
                name: request.name.trim().to_string(),
                price,
                order_number: Order::generate_order_number(),
                due_date,
                status: OrderStatus::Unfinished,
                phone: request.phone.trim().to_string(),
            }),
            _ => Err(validation.errors),
        }
    }

    fn validate_name(name: &str) -> Result<(), OrderValidationError> {
        if name.trim().is_empty() {
            return Err(OrderValidationError::EmptyName);
        }
        Ok(())
    }

    fn parse_price(price: &str) -> Result<f64, OrderValidationError> {
        let cleaned = price.trim();
        if cleaned.is_empty() {
            return Err(OrderValidationError::EmptyPrice);
        }
        match cleaned.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
            _ => Err(OrderValidationError::InvalidPrice),
        }
    }

    fn validate_due_date(due_date: &str) -> Result<chrono::NaiveDate, OrderValidationError> {
        if due_date.trim().is_empty() {
            return Err(OrderValidationError::EmptyDueDate);
        }
        parse_due_date(due_date).ok_or(OrderValidationError::InvalidDueDate)
    }

    fn validate_phone(phone: &str) -> Result<(), OrderValidationError> {
        let phone = phone.trim();
        if phone.is_empty() {
            return Err(OrderValidationError::EmptyPhone);
        }
        let digit_count = phone.chars().count();
        if !phone.chars().all(|c| c.is_ascii_digit())
            || !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digit_count)
        {
            return Err(OrderValidationError::InvalidPhone);
        }
        Ok(())
    }
}
