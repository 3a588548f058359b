use std::fmt;

use serde::de::{Deserialize, Deserializer, Error, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::layout::{valid_bounds, Layout};
use crate::{FlexLayout, Order};

impl Serialize for FlexLayout {
    fn serialize<Sr>(&self, serializer: Sr) -> Result<Sr::Ok, Sr::Error>
    where
        Sr: Serializer,
    {
        let mut layout = serializer.serialize_struct("FlexLayout", 2)?;
        layout.serialize_field("bounds", self.bounds())?;
        layout.serialize_field("order", &self.order())?;
        layout.end()
    }
}

struct FlexLayoutVisitor;

impl<'de> Visitor<'de> for FlexLayoutVisitor {
    type Value = FlexLayout;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a layout with \"bounds\" and \"order\" fields")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut bounds: Option<Vec<usize>> = None;
        let mut order: Option<Order> = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "bounds" => {
                    if bounds.is_some() {
                        return Err(A::Error::duplicate_field("bounds"));
                    }
                    bounds = Some(map.next_value()?);
                }
                "order" => {
                    if order.is_some() {
                        return Err(A::Error::duplicate_field("order"));
                    }
                    order = Some(map.next_value()?);
                }
                _ => {
                    return Err(A::Error::unknown_field(&key, &["bounds", "order"]));
                }
            }
        }

        let Some(bounds) = bounds else {
            return Err(A::Error::missing_field("bounds"));
        };
        let order = order.unwrap_or_default();

        if !valid_bounds(&bounds) {
            return Err(A::Error::custom(
                "bounds must be non-empty and positive, with a product that fits in usize",
            ));
        }

        Ok(FlexLayout::new(&bounds, order))
    }
}

impl<'de> Deserialize<'de> for FlexLayout {
    fn deserialize<D>(deserializer: D) -> Result<FlexLayout, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_struct("FlexLayout", &["bounds", "order"], FlexLayoutVisitor)
    }
}
