use serde::de::DeserializeOwned;

/// Deserialize JSON with document-path context in error messages.
pub fn from_json_with_path<T: DeserializeOwned>(src: &str) -> Result<T, String> {
    let de = &mut serde_json::Deserializer::from_str(src);
    match serde_path_to_error::deserialize::<_, T>(de) {
        Ok(v) => Ok(v),
        Err(err) => {
            let path = err.path().to_string();
            Err(format!("at path {path} → {}", err.into_inner()))
        }
    }
}

/// Same as [`from_json_with_path`], for a single YAML document. Merge keys
/// (`<<: *anchor`) are applied before decoding.
pub fn from_yaml_with_path<T: DeserializeOwned>(src: &str) -> Result<T, String> {
    let mut value: serde_yaml::Value = serde_yaml::from_str(src).map_err(|err| format!("→ {err}"))?;
    value.apply_merge().map_err(|err| format!("→ {err}"))?;
    match serde_path_to_error::deserialize::<_, T>(value) {
        Ok(v) => Ok(v),
        Err(err) => {
            let path = err.path().to_string();
            Err(format!("at path {path} → {}", err.into_inner()))
        }
    }
}
