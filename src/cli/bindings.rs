//! Parameter and resource commands.

use serde::Serialize;

use crate::cli::output;
use crate::cli::{Context, ResourceKind};
use crate::core::binding::{
    self, BucketResources, EventBusResources, FunctionResources, QueueResources, RdsResources,
    Resources, TableResources, TopicResources,
};
use crate::error::Result;

/// List all parameters.
pub fn parameters(ctx: &Context, json: bool) -> Result<()> {
    let params = binding::parameters(&ctx.env);

    if json {
        println!("{}", serde_json::to_string_pretty(&params)?);
    } else if params.is_empty() {
        output::dimmed("no parameters bound");
    } else {
        output::header(&format!("{} parameters", params.len()));
        for (name, value) in &params {
            output::kv(name, value);
        }
    }

    Ok(())
}

/// Print a single parameter value.
pub fn parameter(ctx: &Context, name: &str) -> Result<()> {
    println!("{}", binding::parameter(&ctx.env, name)?);
    Ok(())
}

/// Print the attributes of one resource.
pub fn resource(ctx: &Context, kind: ResourceKind, name: &str, json: bool) -> Result<()> {
    let attributes = match kind {
        ResourceKind::Function => attributes::<FunctionResources>(ctx, name)?,
        ResourceKind::Bucket => attributes::<BucketResources>(ctx, name)?,
        ResourceKind::Queue => attributes::<QueueResources>(ctx, name)?,
        ResourceKind::Topic => attributes::<TopicResources>(ctx, name)?,
        ResourceKind::EventBus => attributes::<EventBusResources>(ctx, name)?,
        ResourceKind::Rds => attributes::<RdsResources>(ctx, name)?,
        ResourceKind::Table => attributes::<TableResources>(ctx, name)?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&attributes)?);
    } else {
        output::header(name);
        if let serde_json::Value::Object(fields) = &attributes {
            for (property, value) in fields {
                output::kv(property, value.as_str().unwrap_or_default());
            }
        }
    }

    Ok(())
}

fn attributes<T: Resources + Serialize>(ctx: &Context, name: &str) -> Result<serde_json::Value> {
    let resource = T::from_env(&ctx.env, ctx, name)?;
    Ok(serde_json::to_value(resource)?)
}
