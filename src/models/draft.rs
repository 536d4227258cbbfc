use super::{error::ValidationError, prices::NewPrice};

/// Field of the price form being edited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftField {
    Product,
    Supplier,
    Price,
}

/// Unvalidated price form input, held exactly as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PriceDraft {
    pub product_id: String,
    pub supplier_id: String,
    pub price: String,
}

impl PriceDraft {
    pub fn new(
        product_id: impl Into<String>,
        supplier_id: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            supplier_id: supplier_id.into(),
            price: price.into(),
        }
    }

    pub fn set(&mut self, field: DraftField, value: String) {
        match field {
            DraftField::Product => self.product_id = value,
            DraftField::Supplier => self.supplier_id = value,
            DraftField::Price => self.price = value,
        }
    }

    pub fn with(mut self, field: DraftField, value: impl Into<String>) -> Self {
        self.set(field, value.into());
        self
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Checks presence first, then the price, and builds the insert row.
    ///
    /// Presence is judged on the text as typed; whitespace only counts as
    /// present and then fails to parse.
    pub fn validate(&self) -> Result<NewPrice, ValidationError> {
        if self.product_id.is_empty() || self.supplier_id.is_empty() || self.price.is_empty() {
            return Err(ValidationError::MissingInformation);
        }

        let price: f64 = self
            .price
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidPrice)?;
        if !price.is_finite() || price <= 0.0 {
            return Err(ValidationError::InvalidPrice);
        }

        let product_id = self
            .product_id
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidSelection)?;
        let supplier_id = self
            .supplier_id
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidSelection)?;

        Ok(NewPrice {
            product_id,
            supplier_id,
            price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_field_is_missing_information() {
        let draft = PriceDraft::new("", "2", "10");
        assert_eq!(draft.validate(), Err(ValidationError::MissingInformation));

        let draft = PriceDraft::new("1", "", "10");
        assert_eq!(draft.validate(), Err(ValidationError::MissingInformation));
    }

    #[test]
    fn whitespace_price_is_invalid_not_missing() {
        let draft = PriceDraft::new("1", "2", "   ");
        assert_eq!(draft.validate(), Err(ValidationError::InvalidPrice));

        let row = PriceDraft::new(" 1", "2 ", " 4.5 ").validate().unwrap();
        assert_eq!(row.product_id, 1);
        assert_eq!(row.supplier_id, 2);
        assert_eq!(row.price, 4.5);
    }

    #[test]
    fn presence_is_checked_before_price() {
        let draft = PriceDraft::new("", "2", "-5");
        assert_eq!(draft.validate(), Err(ValidationError::MissingInformation));
    }

    #[test]
    fn non_positive_or_garbage_price_is_invalid() {
        for price in ["-5", "0", "0.0", "abc", "NaN", "inf", "1e999"] {
            let draft = PriceDraft::new("1", "2", price);
            assert_eq!(
                draft.validate(),
                Err(ValidationError::InvalidPrice),
                "price {price:?}"
            );
        }
    }

    #[test]
    fn valid_draft_builds_row() {
        let row = PriceDraft::new("1", "2", "19.99").validate().unwrap();
        assert_eq!(
            row,
            NewPrice {
                product_id: 1,
                supplier_id: 2,
                price: 19.99
            }
        );
    }

    #[test]
    fn non_numeric_reference_is_rejected() {
        let draft = PriceDraft::new("rice", "2", "3");
        assert_eq!(draft.validate(), Err(ValidationError::InvalidSelection));
    }

    #[test]
    fn set_and_clear() {
        let mut draft = PriceDraft::default()
            .with(DraftField::Product, "1")
            .with(DraftField::Supplier, "3");
        draft.set(DraftField::Price, "2.5".into());
        assert_eq!(draft, PriceDraft::new("1", "3", "2.5"));

        draft.clear();
        assert_eq!(draft, PriceDraft::new("", "", ""));
    }
}
