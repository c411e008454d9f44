//! Closure-backed and split transforms

use crate::transform::{Transform, TransformResult};
use fieldset_core::{Concern, Context};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// User conversion closure. Errors are wrapped into a [`Concern`].
pub type Conversion = Arc<dyn Fn(Value) -> anyhow::Result<Value> + Send + Sync>;

fn convert(conversion: &Conversion, direction: &str, value: Value) -> TransformResult<Value> {
    conversion(value).map_err(|error| {
        tracing::trace!(direction, error = %error, "conversion failed");
        Concern::new("Unable to transform {0} value: {1}")
            .arg(direction)
            .arg(error.to_string())
    })
}

/// Converts incoming values with a closure; outgoing values pass through
#[derive(Clone)]
pub struct IngressTransform {
    ingress: Conversion,
}

impl IngressTransform {
    pub fn new<F>(ingress: F) -> Self
    where
        F: Fn(Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self {
            ingress: Arc::new(ingress),
        }
    }
}

impl Transform for IngressTransform {
    fn native(&self, value: Value, _context: Context<'_>) -> TransformResult<Value> {
        convert(&self.ingress, "incoming", value)
    }

    fn foreign(&self, value: Value, _context: Context<'_>) -> TransformResult<Value> {
        Ok(value)
    }
}

impl fmt::Debug for IngressTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngressTransform").finish_non_exhaustive()
    }
}

/// Converts outgoing values with a closure; incoming values pass through
#[derive(Clone)]
pub struct EgressTransform {
    egress: Conversion,
}

impl EgressTransform {
    pub fn new<F>(egress: F) -> Self
    where
        F: Fn(Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self {
            egress: Arc::new(egress),
        }
    }
}

impl Transform for EgressTransform {
    fn native(&self, value: Value, _context: Context<'_>) -> TransformResult<Value> {
        Ok(value)
    }

    fn foreign(&self, value: Value, _context: Context<'_>) -> TransformResult<Value> {
        convert(&self.egress, "outgoing", value)
    }
}

impl fmt::Debug for EgressTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EgressTransform").finish_non_exhaustive()
    }
}

/// Converts both directions with a pair of closures
#[derive(Clone)]
pub struct CallbackTransform {
    ingress: Conversion,
    egress: Conversion,
}

impl CallbackTransform {
    pub fn new<I, E>(ingress: I, egress: E) -> Self
    where
        I: Fn(Value) -> anyhow::Result<Value> + Send + Sync + 'static,
        E: Fn(Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self {
            ingress: Arc::new(ingress),
            egress: Arc::new(egress),
        }
    }
}

impl Transform for CallbackTransform {
    fn native(&self, value: Value, _context: Context<'_>) -> TransformResult<Value> {
        convert(&self.ingress, "incoming", value)
    }

    fn foreign(&self, value: Value, _context: Context<'_>) -> TransformResult<Value> {
        convert(&self.egress, "outgoing", value)
    }
}

impl fmt::Debug for CallbackTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackTransform").finish_non_exhaustive()
    }
}

/// Delegates reading and writing to two independent transforms.
///
/// `loads`/`load` go through the reader and `dumps`/`dump` through the
/// writer, each with its own options.
#[derive(Clone)]
pub struct SplitTransform {
    reader: Arc<dyn Transform>,
    writer: Arc<dyn Transform>,
}

impl SplitTransform {
    pub fn new<R, W>(reader: R, writer: W) -> Self
    where
        R: Transform + 'static,
        W: Transform + 'static,
    {
        Self {
            reader: Arc::new(reader),
            writer: Arc::new(writer),
        }
    }

    pub fn builder() -> SplitTransformBuilder {
        SplitTransformBuilder::default()
    }

    pub fn reader(&self) -> &Arc<dyn Transform> {
        &self.reader
    }

    pub fn writer(&self) -> &Arc<dyn Transform> {
        &self.writer
    }
}

impl Transform for SplitTransform {
    fn native(&self, value: Value, context: Context<'_>) -> TransformResult<Value> {
        self.reader.native(value, context)
    }

    fn foreign(&self, value: Value, context: Context<'_>) -> TransformResult<Value> {
        self.writer.foreign(value, context)
    }

    fn loads(&self, text: &str, context: Context<'_>) -> TransformResult<Value> {
        self.reader.loads(text, context)
    }

    fn dumps(&self, value: Value, context: Context<'_>) -> TransformResult<String> {
        self.writer.dumps(value, context)
    }

    fn load(&self, reader: &mut dyn std::io::Read, context: Context<'_>) -> TransformResult<Value> {
        self.reader.load(reader, context)
    }

    fn dump(
        &self,
        writer: &mut dyn std::io::Write,
        value: Value,
        context: Context<'_>,
    ) -> TransformResult<usize> {
        self.writer.dump(writer, value, context)
    }
}

impl fmt::Debug for SplitTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitTransform")
            .field("reader_options", self.reader.options())
            .field("writer_options", self.writer.options())
            .finish()
    }
}

/// Builder for [`SplitTransform`]; both sides are required
#[derive(Default)]
pub struct SplitTransformBuilder {
    reader: Option<Arc<dyn Transform>>,
    writer: Option<Arc<dyn Transform>>,
}

impl SplitTransformBuilder {
    pub fn reader<R: Transform + 'static>(mut self, reader: R) -> Self {
        self.reader = Some(Arc::new(reader));
        self
    }

    pub fn writer<W: Transform + 'static>(mut self, writer: W) -> Self {
        self.writer = Some(Arc::new(writer));
        self
    }

    pub fn build(self) -> TransformResult<SplitTransform> {
        match (self.reader, self.writer) {
            (Some(reader), Some(writer)) => Ok(SplitTransform { reader, writer }),
            (None, _) => Err(Concern::new("SplitTransform instances must define a reader.")),
            (_, None) => Err(Concern::new("SplitTransform instances must define a writer.")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Context as _};
    use fieldset_core::value::display;
    use serde_json::json;
    use std::io::Cursor;

    fn to_int(value: Value) -> anyhow::Result<Value> {
        match value {
            Value::Number(n) => {
                let f = n.as_f64().context("not a number")?;
                if !f.is_finite() {
                    return Err(anyhow!("cannot convert float infinity to integer"));
                }
                Ok(json!(f.trunc() as i64))
            }
            Value::String(s) => {
                let n: i64 = s
                    .trim()
                    .parse()
                    .with_context(|| format!("invalid literal for int(): {:?}", s))?;
                Ok(json!(n))
            }
            other => Err(anyhow!("int() argument must be a string or a number, not {}", other)),
        }
    }

    fn to_text(value: Value) -> anyhow::Result<Value> {
        Ok(Value::String(display(&value)))
    }

    fn split() -> SplitTransform {
        SplitTransform::builder()
            .reader(IngressTransform::new(to_int))
            .writer(EgressTransform::new(to_text))
            .build()
            .unwrap()
    }

    #[test]
    fn test_ingress_converts_incoming_only() {
        let ingress = IngressTransform::new(to_int);
        assert_eq!(ingress.native(json!(27), None).unwrap(), json!(27));
        assert_eq!(ingress.native(json!("42"), None).unwrap(), json!(42));
        assert_eq!(ingress.native(json!(2.15), None).unwrap(), json!(2));
        assert_eq!(ingress.foreign(json!("x"), None).unwrap(), json!("x"));

        for value in [json!("x"), json!(""), json!([]), json!({})] {
            let concern = ingress.native(value, None).unwrap_err();
            assert!(concern.render().contains("incoming"));
        }
        assert!(ingress
            .native(json!("x"), None)
            .unwrap_err()
            .render()
            .contains("invalid literal"));
    }

    #[test]
    fn test_egress_converts_outgoing_only() {
        let egress = EgressTransform::new(to_int);
        assert_eq!(egress.foreign(json!("42"), None).unwrap(), json!(42));
        assert_eq!(egress.native(json!("x"), None).unwrap(), json!("x"));
        assert!(egress.foreign(json!("x"), None).unwrap_err().render().contains("outgoing"));
    }

    #[test]
    fn test_callback_both_directions() {
        let transform = CallbackTransform::new(to_int, to_text);
        assert_eq!(transform.native(json!("5"), None).unwrap(), json!(5));
        assert_eq!(transform.foreign(json!(5), None).unwrap(), json!("5"));
    }

    #[test]
    fn test_split_requires_both_sides() {
        assert!(SplitTransform::builder().build().is_err());
        assert!(SplitTransform::builder().reader(IngressTransform::new(to_int)).build().is_err());
        assert!(SplitTransform::builder().writer(EgressTransform::new(to_text)).build().is_err());
    }

    #[test]
    fn test_split_reader_side() {
        let transform = split();
        assert_eq!(transform.native(json!("27"), None).unwrap(), json!(27));
        assert_eq!(transform.native(json!(3.14159), None).unwrap(), json!(3));
        assert_eq!(transform.native(json!(0.5), None).unwrap(), json!(0));
        assert!(transform.native(json!("x"), None).is_err());
        assert_eq!(transform.loads("", None).unwrap(), Value::Null);

        let mut input = Cursor::new(b"42".to_vec());
        assert_eq!(transform.load(&mut input, None).unwrap(), json!(42));
    }

    #[test]
    fn test_split_writer_side() {
        let transform = split();
        assert_eq!(transform.foreign(json!(27), None).unwrap(), json!("27"));
        assert_eq!(transform.foreign(json!(3.14), None).unwrap(), json!("3.14"));
        assert_eq!(transform.dumps(Value::Null, None).unwrap(), "");

        let mut output = Vec::new();
        assert_eq!(transform.dump(&mut output, json!(2.15), None).unwrap(), 4);
        assert_eq!(output, b"2.15");
    }
}
