//! Secret commands.

use crate::cli::output;
use crate::cli::Context;
use crate::error::Result;

/// Print a single secret value.
pub fn get(ctx: &Context, name: &str) -> Result<()> {
    let value = ctx.secrets().get_one(name)?;
    println!("{}", value);
    Ok(())
}

/// List all secrets, masked unless `show` is set.
pub fn list(ctx: &Context, show: bool, json: bool) -> Result<()> {
    let secrets = ctx.secrets().get_all()?;
    let render = |value: &String| if show { value.clone() } else { output::mask(value) };

    if json {
        let values: serde_json::Map<String, serde_json::Value> = secrets
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(render(v))))
            .collect();
        let output = serde_json::json!({
            "secrets": values,
            "count": secrets.len()
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if secrets.is_empty() {
        output::dimmed("no secrets bound");
    } else {
        output::header(&format!("{} secrets", secrets.len()));
        for (name, value) in &secrets {
            output::kv(name, render(value));
        }
    }

    Ok(())
}
