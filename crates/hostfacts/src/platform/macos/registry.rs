use std::process::{Command, Stdio};

use plist::{Dictionary, Value};

use crate::error::ErrorKind;
use crate::platform::PropertyValue;
use crate::{Error, Result};

const CHILDREN_KEY: &str = "IORegistryEntryChildren";

/// Run `program` and parse its standard output as a property list.
fn command_plist(program: &str, args: &[&str]) -> Result<Option<Value>> {
    debug!("running {program} {}", args.join(" "));

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .map_err(Error::io)?;

    if !output.status.success() {
        return Err(Error::absent(format!(
            "{program} exited with {}",
            output.status
        )));
    }

    // no matching registry entries prints nothing at all
    if output.stdout.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(None);
    }

    plist::from_bytes::<Value>(&output.stdout)
        .map(Some)
        .map_err(|e| Error::without_path(ErrorKind::MalformedRecord, e))
}

/// I/O registry entries of the given class, with their properties and
/// children.
pub(crate) fn entries(class: &str) -> Result<Vec<Dictionary>> {
    let Some(value) = command_plist("ioreg", &["-a", "-l", "-r", "-c", class])? else {
        return Ok(Vec::new());
    };

    match value {
        Value::Array(entries) => Ok(entries
            .into_iter()
            .filter_map(|entry| entry.into_dictionary())
            .collect()),
        Value::Dictionary(entry) => Ok(vec![entry]),
        _ => Err(Error::malformed(format!("ioreg output for {class}"))),
    }
}

/// Find `key` on an entry or, depth first, on any of its children.
pub(crate) fn find<'a>(entry: &'a Dictionary, key: &str) -> Option<&'a Value> {
    if let Some(value) = entry.get(key) {
        return Some(value);
    }

    entry
        .get(CHILDREN_KEY)
        .and_then(|children| children.as_array())
        .into_iter()
        .flatten()
        .filter_map(|child| child.as_dictionary())
        .find_map(|child| find(child, key))
}

pub(crate) fn property_value(value: &Value) -> Option<PropertyValue> {
    match value {
        Value::Integer(v) => v.as_signed().map(PropertyValue::Integer),
        Value::String(v) => Some(PropertyValue::String(v.clone())),
        Value::Boolean(v) => Some(PropertyValue::Bool(*v)),
        Value::Data(v) => Some(PropertyValue::Data(v.clone())),
        _ => None,
    }
}

/// Model names of the graphics adapters known to System Profiler.
pub(crate) fn graphics_adapters() -> Result<Vec<String>> {
    let Some(value) = command_plist("system_profiler", &["-xml", "SPDisplaysDataType"])? else {
        return Ok(Vec::new());
    };

    let adapters = value
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|report| report.as_dictionary())
        .filter_map(|report| report.get("_items").and_then(|items| items.as_array()))
        .flatten()
        .filter_map(|item| item.as_dictionary())
        .filter_map(|item| {
            item.get("sppci_model")
                .or_else(|| item.get("_name"))
                .and_then(|name| name.as_string())
                .map(|name| name.to_owned())
        })
        .collect();

    Ok(adapters)
}
