//! Resource bindings and parameters.
//!
//! Each resource kind is described by a [`ResourceTable`]: the construct kind
//! and, per property, a setter for the struct field it fills. One generic
//! [`bind`] reads `SST_<Kind>_<property>_<id>` for every property.
//! Attributes that reference a secret are resolved through a
//! [`SecretLookup`], normally the [`SecretCache`].

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::core::cache::SecretCache;
use crate::core::constants::PARAMETER_PREFIX;
use crate::core::env::{normalise_id, BindingName, BindingValue, Environment};
use crate::error::{BindingError, Result};

/// Sets one field of `T` from a resolved value.
pub type Setter<T> = fn(&mut T, String);

/// Declarative description of a resource kind.
pub struct ResourceTable<T: 'static> {
    /// Construct kind as it appears in env var names.
    pub kind: &'static str,
    /// `(property, setter)` pairs, read in order.
    pub properties: &'static [(&'static str, Setter<T>)],
}

/// Resolves secret references found in resource attributes.
pub trait SecretLookup {
    fn secret(&self, name: &str) -> Result<String>;
}

impl SecretLookup for SecretCache {
    fn secret(&self, name: &str) -> Result<String> {
        self.get_one(name)
    }
}

/// A typed set of resource attributes.
pub trait Resources: Default + 'static {
    const TABLE: ResourceTable<Self>;

    /// Bind the resource called `name` from `env`.
    ///
    /// # Errors
    ///
    /// Returns `BindingError::MissingVariable` for the first absent or empty
    /// attribute, or any secret error for attributes that reference a secret.
    fn from_env<S: SecretLookup + ?Sized>(env: &Environment, secrets: &S, name: &str) -> Result<Self> {
        bind(&Self::TABLE, env, secrets, name)
    }
}

/// Populate a `T` from the env vars described by `table`.
///
/// Missing attributes fail before any secret is resolved for the remaining
/// properties; a resource without secret references never touches the
/// parameter store.
pub fn bind<T: Default + 'static, S: SecretLookup + ?Sized>(
    table: &ResourceTable<T>,
    env: &Environment,
    secrets: &S,
    name: &str,
) -> Result<T> {
    let mut resource = T::default();

    for (property, set) in table.properties {
        let var = BindingName::var_name(table.kind, property, name);
        let raw = env
            .get(&var)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| BindingError::MissingVariable {
                var: var.clone(),
                kind: table.kind.to_string(),
                id: normalise_id(name),
            })?;

        let value = match BindingValue::parse(raw) {
            BindingValue::Literal(value) => value,
            BindingValue::SecretReference(secret) => {
                debug!(var = %var, secret = %secret, "resolving secret reference");
                secrets.secret(&secret)?
            }
            BindingValue::DeferredSecret => {
                return Err(BindingError::UnexpectedDeferred { var }.into());
            }
        };
        set(&mut resource, value);
    }

    Ok(resource)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResources {
    pub function_name: String,
}

impl Resources for FunctionResources {
    const TABLE: ResourceTable<Self> = ResourceTable {
        kind: "Function",
        properties: &[("functionName", |r, v| r.function_name = v)],
    };
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketResources {
    pub bucket_name: String,
}

impl Resources for BucketResources {
    const TABLE: ResourceTable<Self> = ResourceTable {
        kind: "Bucket",
        properties: &[("bucketName", |r, v| r.bucket_name = v)],
    };
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueResources {
    pub queue_url: String,
}

impl Resources for QueueResources {
    const TABLE: ResourceTable<Self> = ResourceTable {
        kind: "Queue",
        properties: &[("queueUrl", |r, v| r.queue_url = v)],
    };
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicResources {
    pub topic_arn: String,
}

impl Resources for TopicResources {
    const TABLE: ResourceTable<Self> = ResourceTable {
        kind: "Topic",
        properties: &[("topicArn", |r, v| r.topic_arn = v)],
    };
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBusResources {
    pub event_bus_name: String,
}

impl Resources for EventBusResources {
    const TABLE: ResourceTable<Self> = ResourceTable {
        kind: "EventBus",
        properties: &[("eventBusName", |r, v| r.event_bus_name = v)],
    };
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RdsResources {
    pub cluster_arn: String,
    pub secret_arn: String,
    pub default_database_name: String,
}

impl Resources for RdsResources {
    const TABLE: ResourceTable<Self> = ResourceTable {
        kind: "RDS",
        properties: &[
            ("clusterArn", |r, v| r.cluster_arn = v),
            ("secretArn", |r, v| r.secret_arn = v),
            ("defaultDatabaseName", |r, v| r.default_database_name = v),
        ],
    };
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableResources {
    pub table_name: String,
}

impl Resources for TableResources {
    const TABLE: ResourceTable<Self> = ResourceTable {
        kind: "Table",
        properties: &[("tableName", |r, v| r.table_name = v)],
    };
}

/// All `SST_Parameter_value_<name>` bindings, keyed by name.
pub fn parameters(env: &Environment) -> BTreeMap<String, String> {
    env.entries()
        .iter()
        .filter_map(|(k, v)| {
            let name = k.strip_prefix(PARAMETER_PREFIX)?;
            Some((name.to_string(), v.clone()))
        })
        .collect()
}

/// A single parameter by name.
///
/// # Errors
///
/// Returns `BindingError::ParameterNotSet` if the env var is absent.
pub fn parameter(env: &Environment, name: &str) -> Result<String> {
    env.get(&format!("{}{}", PARAMETER_PREFIX, name))
        .map(str::to_string)
        .ok_or_else(|| BindingError::ParameterNotSet(name.to_string()).into())
}
