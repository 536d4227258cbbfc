use serde::{Deserialize, Serialize};

/// Reference data: a product prices are recorded against.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub unit: String,
}

impl Product {
    /// Option label used by the price form, e.g. `Apples (kg)`.
    pub fn label(&self) -> String {
        if self.unit.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.unit)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub contact_info: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_label_includes_unit() {
        let product = Product {
            id: 1,
            name: "Apples".into(),
            unit: "kg".into(),
        };
        assert_eq!(product.label(), "Apples (kg)");

        let bare = Product {
            unit: String::new(),
            ..product
        };
        assert_eq!(bare.label(), "Apples");
    }

    #[test]
    fn product_tolerates_null_or_missing_unit() {
        let products: Vec<Product> = serde_json::from_str(
            r#"[{"id": 1, "name": "Rice", "unit": null}, {"id": 2, "name": "Salt"}]"#,
        )
        .unwrap();
        assert_eq!(products[0].unit, "");
        assert_eq!(products[1].unit, "");
        assert_eq!(products[0].label(), "Rice");
    }

    #[test]
    fn supplier_tolerates_null_contact() {
        let json = r#"{"id": 4, "name": "Green Farms", "contact_info": null}"#;
        let supplier: Supplier = serde_json::from_str(json).unwrap();
        assert_eq!(supplier.contact_info, "");
        assert_eq!(supplier.name, "Green Farms");
    }
}
