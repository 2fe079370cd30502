//! Configured accessor resolution.
//!
//! A getter expression is a method name optionally followed by a
//! parenthesized list of literal arguments, e.g. `getLabel` or
//! `getLabel('en', 2)`. Instead of looking methods up at runtime, callers
//! register typed invoker closures per (type, method name) in an
//! [`AccessorRegistry`]; the registry parses the expression and dispatches
//! to the matching closure.
//!
//! ```
//! use solrmap::mapping::accessor::{AccessorRegistry, AccessorValue};
//! use solrmap::mapping::entity::entity;
//!
//! struct Tag {
//!     name: String,
//! }
//!
//! let mut accessors = AccessorRegistry::new();
//! accessors.register_getter("getName", |tag: &Tag| tag.name.clone());
//!
//! let tag = entity(Tag { name: "rust".to_string() });
//! let value = accessors.invoke(tag.as_ref(), "getName").unwrap();
//! assert_eq!(value.as_value().and_then(|v| v.as_text()), Some("rust"));
//! ```

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;
use serde::Serialize;

use crate::document::FieldValue;
use crate::error::{Result, SolrmapError};
use crate::mapping::entity::{Entity, EntityRef};

/// Result of an accessor invocation.
#[derive(Debug, Clone)]
pub enum AccessorValue {
    /// A document-safe value.
    Value(FieldValue),
    /// Another entity.
    Object(EntityRef),
}

impl AccessorValue {
    /// Wrap a document-safe value.
    pub fn value<V: Into<FieldValue>>(value: V) -> Self {
        AccessorValue::Value(value.into())
    }

    /// Wrap a related entity.
    pub fn object(object: EntityRef) -> Self {
        AccessorValue::Object(object)
    }

    pub fn as_value(&self) -> Option<&FieldValue> {
        match self {
            AccessorValue::Value(value) => Some(value),
            AccessorValue::Object(_) => None,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, AccessorValue::Object(_))
    }
}

/// A parsed getter expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessorCall {
    method: String,
    args: Vec<String>,
}

impl AccessorCall {
    /// Parse a getter expression.
    ///
    /// Arguments are split on `,`, trimmed, and stripped of surrounding
    /// quote characters. No type coercion is applied. `name()` has no
    /// arguments.
    pub fn parse(expression: &str) -> Result<Self> {
        let (method, args) = match expression.find('(') {
            Some(open) => {
                let method = &expression[..open];
                let args = match expression.rfind(')') {
                    Some(close) if close > open => parse_arguments(&expression[open + 1..close]),
                    _ => Vec::new(),
                };
                (method, args)
            }
            None => (expression, Vec::new()),
        };

        let method = method.trim();
        if method.is_empty() {
            return Err(SolrmapError::resolution(format!(
                "getter expression `{expression}` has no method name"
            )));
        }

        Ok(AccessorCall {
            method: method.to_string(),
            args,
        })
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Renders the canonical form `method('a', 'b')`.
///
/// Arguments are quoted but not escaped, so an argument containing `,`
/// does not parse back into the same call.
impl fmt::Display for AccessorCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            write!(f, "{}", self.method)
        } else {
            let args: Vec<String> = self.args.iter().map(|a| format!("'{a}'")).collect();
            write!(f, "{}({})", self.method, args.join(", "))
        }
    }
}

fn parse_arguments(list: &str) -> Vec<String> {
    if list.trim().is_empty() {
        return Vec::new();
    }

    list.split(',')
        .map(|arg| arg.trim().trim_matches(['\'', '"']).trim().to_string())
        .collect()
}

/// Fetch a positional argument, failing with a resolution error if absent.
pub fn argument<'a>(args: &'a [String], index: usize, method: &str) -> Result<&'a str> {
    args.get(index).map(String::as_str).ok_or_else(|| {
        SolrmapError::resolution(format!(
            "`{method}` expects at least {} argument(s), got {}",
            index + 1,
            args.len()
        ))
    })
}

type Invoker = Arc<dyn Fn(&dyn Any, &[String]) -> Result<AccessorValue> + Send + Sync>;

/// Registry of typed invokers keyed by (runtime type, method name).
///
/// Built once at configuration time and read-only afterwards, so a single
/// registry can be shared across threads.
#[derive(Clone, Default)]
pub struct AccessorRegistry {
    invokers: AHashMap<(TypeId, String), Invoker>,
}

impl fmt::Debug for AccessorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessorRegistry")
            .field("methods", &self.invokers.len())
            .finish()
    }
}

impl AccessorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an invoker receiving the parsed literal arguments.
    pub fn register<T, F>(&mut self, method: &str, invoker: F) -> &mut Self
    where
        T: Any,
        F: Fn(&T, &[String]) -> Result<AccessorValue> + Send + Sync + 'static,
    {
        let type_name = std::any::type_name::<T>();
        let wrapped: Invoker = Arc::new(move |target: &dyn Any, args: &[String]| {
            let target = target.downcast_ref::<T>().ok_or_else(|| {
                SolrmapError::resolution(format!("receiver is not a `{type_name}`"))
            })?;
            invoker(target, args)
        });
        self.invokers
            .insert((TypeId::of::<T>(), method.to_string()), wrapped);
        self
    }

    /// Register an argument-less getter returning a document-safe value.
    pub fn register_getter<T, V, F>(&mut self, method: &str, getter: F) -> &mut Self
    where
        T: Any,
        V: Into<FieldValue>,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.register(method, move |target: &T, _args: &[String]| {
            Ok(AccessorValue::value(getter(target)))
        })
    }

    /// Register an argument-less getter returning another entity.
    pub fn register_relation<T, F>(&mut self, method: &str, getter: F) -> &mut Self
    where
        T: Any,
        F: Fn(&T) -> EntityRef + Send + Sync + 'static,
    {
        self.register(method, move |target: &T, _args: &[String]| {
            Ok(AccessorValue::object(getter(target)))
        })
    }

    /// Check whether `method` is registered for `T`.
    pub fn contains<T: Any>(&self, method: &str) -> bool {
        self.invokers
            .contains_key(&(TypeId::of::<T>(), method.to_string()))
    }

    /// Number of registered invokers.
    pub fn len(&self) -> usize {
        self.invokers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invokers.is_empty()
    }

    /// Parse `expression` and invoke it on `object`.
    pub fn invoke(&self, object: &dyn Entity, expression: &str) -> Result<AccessorValue> {
        let call = AccessorCall::parse(expression)?;
        self.call(object, &call)
    }

    /// Invoke an already parsed call on `object`.
    pub fn call(&self, object: &dyn Entity, call: &AccessorCall) -> Result<AccessorValue> {
        let target = object.as_any();
        let key = (target.type_id(), call.method().to_string());
        let invoker = self.invokers.get(&key).ok_or_else(|| {
            SolrmapError::resolution(format!(
                "method `{}` does not exist on `{}`",
                call.method(),
                object.entity_type()
            ))
        })?;

        invoker(target, call.args()).map_err(|err| match err {
            SolrmapError::Resolution(_) => err,
            other => SolrmapError::resolution(format!(
                "invoking `{}` on `{}` failed: {other}",
                call,
                object.entity_type()
            )),
        })
    }
}
