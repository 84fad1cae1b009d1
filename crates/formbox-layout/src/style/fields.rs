//! Viewport-aware access to raw style fields.

use std::str::FromStr;

use formbox_common::warning::warn_once;
use formbox_tree::StyleFields;
use formbox_tree::fields::MOBILE_PREFIX;
use serde_json::Value;

use super::color::ColorValue;
use crate::sizing::{Dimension, SizeUnit, Sizing, Viewport};

/// Reads one viewport variant of a style record.
///
/// On mobile, `mobile_<name>` wins over `<name>` when it is present and
/// non-empty; desktop never looks at `mobile_` fields. Every accessor
/// degrades to `None` on a wrong-shaped value and reports it once through
/// [`warn_once`].
#[derive(Debug, Clone, Copy)]
pub struct FieldReader<'a> {
    fields: &'a StyleFields,
    viewport: Viewport,
}

impl<'a> FieldReader<'a> {
    /// Wrap a style record for the given viewport.
    #[must_use]
    pub const fn new(fields: &'a StyleFields, viewport: Viewport) -> Self {
        Self { fields, viewport }
    }

    /// The merged raw value of a field.
    #[must_use]
    pub fn raw(&self, name: &str) -> Option<&'a Value> {
        if self.viewport == Viewport::Mobile
            && let Some(value) = self.fields.present(&format!("{MOBILE_PREFIX}{name}"))
        {
            return Some(value);
        }
        self.fields.present(name)
    }

    /// A numeric field. Accepts JSON numbers and numeric strings with an
    /// optional `px` suffix (`"12"`, `"12px"`).
    #[must_use]
    pub fn number(&self, name: &str) -> Option<f64> {
        let parsed = match self.raw(name)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => {
                let s = s.trim();
                s.strip_suffix("px").unwrap_or(s).trim().parse::<f64>().ok()
            }
            _ => None,
        };
        let value = parsed.filter(|v| v.is_finite());
        if value.is_none() {
            warn_once("style", &format!("field '{name}' is not a number"));
        }
        value
    }

    /// A numeric field, `0` when absent or malformed.
    #[must_use]
    pub fn number_or_zero(&self, name: &str) -> f64 {
        self.number(name).unwrap_or(0.0)
    }

    /// A string field.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&'a str> {
        match self.raw(name)? {
            Value::String(s) => Some(s.trim()),
            _ => {
                warn_once("style", &format!("field '{name}' is not a string"));
                None
            }
        }
    }

    /// A keyword field parsed into `T`.
    #[must_use]
    pub fn keyword<T: FromStr>(&self, name: &str) -> Option<T> {
        let text = self.text(name)?;
        let parsed = text.parse::<T>().ok();
        if parsed.is_none() {
            warn_once("style", &format!("unknown value '{text}' in {name}"));
        }
        parsed
    }

    /// A color field.
    #[must_use]
    pub fn color(&self, name: &str) -> Option<ColorValue> {
        let text = self.text(name)?;
        let parsed = ColorValue::parse(text);
        if parsed.is_none() {
            warn_once("style", &format!("unparseable color '{text}' in {name}"));
        }
        parsed
    }

    /// The sizing mode of one dimension: `<dim>_unit` plus the `<dim>`
    /// magnitude. A `px`/`%` unit without a usable magnitude yields `None`.
    #[must_use]
    pub fn sizing(&self, dimension: Dimension) -> Option<Sizing> {
        let name = dimension.name();
        let unit = self.keyword::<SizeUnit>(&format!("{name}_unit"))?;
        let magnitude = match unit {
            SizeUnit::Px | SizeUnit::Percent => self.number(name),
            SizeUnit::Fit | SizeUnit::Fill => None,
        };
        let sizing = Sizing::from_parts(unit, magnitude);
        if sizing.is_none() {
            warn_once(
                "style",
                &format!("{name}_unit '{unit}' needs a non-negative {name}"),
            );
        }
        sizing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> StyleFields {
        StyleFields::new()
            .with("width_unit", "px")
            .with("width", 200)
            .with("mobile_width_unit", "fill")
            .with("gap", "12px")
            .with("mobile_gap", "")
            .with("padding_left", true)
    }

    #[test]
    fn test_mobile_override_applies_only_on_mobile() {
        let style = fields();
        let desktop = FieldReader::new(&style, Viewport::Desktop);
        let mobile = FieldReader::new(&style, Viewport::Mobile);

        assert_eq!(desktop.sizing(Dimension::Width), Some(Sizing::Pixel(200.0)));
        assert_eq!(mobile.sizing(Dimension::Width), Some(Sizing::Fill));
    }

    #[test]
    fn test_blank_mobile_field_falls_back() {
        let style = fields();
        let mobile = FieldReader::new(&style, Viewport::Mobile);
        assert_eq!(mobile.number("gap"), Some(12.0));
    }

    #[test]
    fn test_wrong_shapes_degrade_to_none() {
        let style = fields()
            .with("height_unit", "px")
            .with("axis", 3);
        let reader = FieldReader::new(&style, Viewport::Desktop);

        assert_eq!(reader.number("padding_left"), None);
        assert_eq!(reader.number_or_zero("padding_left"), 0.0);
        assert_eq!(reader.sizing(Dimension::Height), None);
        assert_eq!(reader.text("axis"), None);
        assert_eq!(reader.number("padding_right"), None);
    }
}
