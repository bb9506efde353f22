//! Emission back ends and file persistence.
//!
//! An [`Emitter`] turns one compiled [`OutputType`] into text. [`write_models`]
//! lays the results out as `<dir>/<namespace segments>/<Type>.<ext>`, plus one
//! file for the shared base type.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde_json::json;

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::model::{Method, OutputType};

pub const GENERATED_NOTICE: &str = "This file was generated automatically, you might want to avoid editing it";

pub trait Emitter {
    fn extension(&self) -> &'static str;
    fn emit_type(&self, model: &OutputType, settings: &Settings) -> Result<String>;
    fn emit_base(&self, settings: &Settings) -> Result<String>;
}

// ————————————————————————————————————————————————————————————————————————————
// JSON
// ————————————————————————————————————————————————————————————————————————————

/// The compiled descriptor itself, as pretty JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEmitter;

impl Emitter for JsonEmitter {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn emit_type(&self, model: &OutputType, settings: &Settings) -> Result<String> {
        let mut value = serde_json::to_value(model).map_err(|e| Error::Emit(e.to_string()))?;
        if model.parent.is_none() {
            value["extends"] = serde_json::to_value(settings.base_ref())
                .map_err(|e| Error::Emit(e.to_string()))?;
        }
        serde_json::to_string_pretty(&value).map_err(|e| Error::Emit(e.to_string()))
    }

    fn emit_base(&self, settings: &Settings) -> Result<String> {
        let value = json!({
            "name": settings.base_type,
            "namespace": settings.namespace,
            "base": true,
            "notice": GENERATED_NOTICE,
        });
        serde_json::to_string_pretty(&value).map_err(|e| Error::Emit(e.to_string()))
    }
}

// ————————————————————————————————————————————————————————————————————————————
// OUTLINE
// ————————————————————————————————————————————————————————————————————————————

/// Plain-text outline for reading in a terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineEmitter;

impl Emitter for OutlineEmitter {
    fn extension(&self) -> &'static str {
        "txt"
    }

    fn emit_type(&self, model: &OutputType, settings: &Settings) -> Result<String> {
        let parent = model.parent.clone().unwrap_or_else(|| settings.base_ref());
        let mut lines = vec![
            format!("# {GENERATED_NOTICE}"),
            format!("model {} extends {parent}", model.type_ref()),
        ];
        if let Some(description) = &model.description {
            lines.extend(description.lines().map(|line| format!("  # {line}")));
        }
        for p in &model.properties {
            lines.push(String::new());
            if let Some(description) = &p.description {
                lines.extend(description.lines().map(|line| format!("  # {line}")));
            }
            let state = match (&p.default, p.required) {
                (_, true) => " (required)".to_string(),
                (Some(default), false) => format!(" = {default}"),
                (None, false) => String::new(),
            };
            lines.push(format!("  {}: {}{state}", p.name, p.doc_type));
            lines.push(format!("    {}() -> {}", p.getter, p.doc_type));
            lines.push(format!("    {} -> self", signature(&p.setter)));
            if let Some(adder) = &p.adder {
                lines.push(format!("    {} -> self", signature(adder)));
            }
        }
        lines.push(String::new());
        Ok(lines.join("\n"))
    }

    fn emit_base(&self, settings: &Settings) -> Result<String> {
        Ok(format!("# {GENERATED_NOTICE}\nbase model {}\n", settings.base_ref()))
    }
}

fn signature(method: &Method) -> String {
    match &method.hint {
        Some(hint) => format!("{}({}: {hint})", method.name, method.param),
        None => format!("{}({})", method.name, method.param),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// PERSISTENCE
// ————————————————————————————————————————————————————————————————————————————

/// Directory the models of a namespace land in.
pub fn namespace_dir(dir: &Path, settings: &Settings) -> PathBuf {
    settings.namespace_segments().fold(dir.to_path_buf(), |acc, seg| acc.join(seg))
}

/// Write every model plus the base type file. Returns the paths written (or,
/// on a dry run, the paths that would have been written).
///
/// Everything is rendered before the first write, so an emitter failure or a
/// file collision (a model named like the base type, or two models sharing a
/// name) leaves the directory untouched.
pub fn write_models<'a, I>(
    dir: &Path,
    models: I,
    settings: &Settings,
    emitter: &dyn Emitter,
    dry_run: bool,
) -> Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = &'a OutputType>,
{
    let target = namespace_dir(dir, settings);
    let ext = emitter.extension();

    let mut files = Vec::<(PathBuf, String)>::new();
    let mut seen = HashSet::<PathBuf>::new();
    let mut claim = |name: &str| -> Result<PathBuf> {
        let path = target.join(format!("{name}.{ext}"));
        if !seen.insert(path.clone()) {
            return Err(Error::FileCollision { path, name: name.to_string() });
        }
        Ok(path)
    };

    let base_path = claim(&settings.base_type)?;
    for model in models {
        let path = claim(&model.name)?;
        files.push((path, emitter.emit_type(model, settings)?));
    }
    files.push((base_path, emitter.emit_base(settings)?));

    if dry_run {
        tracing::info!(dir = %target.display(), files = files.len(), "dry run; nothing written");
        return Ok(files.into_iter().map(|(path, _)| path).collect());
    }

    std::fs::create_dir_all(&target).map_err(|source| Error::Write { path: target.clone(), source })?;
    let mut written = Vec::with_capacity(files.len());
    for (path, text) in files {
        std::fs::write(&path, text).map_err(|source| Error::Write { path: path.clone(), source })?;
        tracing::debug!(path = %path.display(), "wrote");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::DefaultValue;
    use crate::model::{FieldType, PropertyDescriptor, TypeRef};

    fn sample() -> OutputType {
        let part = TypeRef::new("Model", "Part");
        OutputType {
            name: "Box".into(),
            namespace: "Model".into(),
            parent: None,
            description: Some("A box of parts".into()),
            properties: vec![
                PropertyDescriptor {
                    name: "parts".into(),
                    ty: FieldType::Collection(Box::new(FieldType::Model(part.clone()))),
                    doc_type: "Part[]".into(),
                    required: false,
                    default: Some(DefaultValue::EmptyArray),
                    description: None,
                    getter: "getParts".into(),
                    setter: Method { name: "setParts".into(), param: "parts".into(), param_doc_type: "Part[]".into(), hint: None },
                    adder: Some(Method { name: "addPart".into(), param: "part".into(), param_doc_type: "Part".into(), hint: Some(part) }),
                },
                PropertyDescriptor {
                    name: "label".into(),
                    ty: FieldType::Primitive("string".into()),
                    doc_type: "string".into(),
                    required: true,
                    default: None,
                    description: Some("shown on the lid".into()),
                    getter: "getLabel".into(),
                    setter: Method { name: "setLabel".into(), param: "label".into(), param_doc_type: "string".into(), hint: None },
                    adder: None,
                },
            ],
        }
    }

    #[test]
    fn json_descriptor_shape() {
        let text = JsonEmitter.emit_type(&sample(), &Settings::default()).unwrap();
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["name"], "Box");
        assert_eq!(v["extends"]["name"], "BaseModel");
        assert_eq!(v["properties"][0]["default"], json!([]));
        assert_eq!(v["properties"][0]["adder"]["hint"]["name"], "Part");
        assert_eq!(v["properties"][0]["type"]["kind"], "collection");
        assert_eq!(v["properties"][1]["required"], true);
        assert!(v["properties"][1]["default"].is_null());
        assert!(v["properties"][1].get("adder").is_none());
    }

    #[test]
    fn outline_lists_accessors() {
        let text = OutlineEmitter.emit_type(&sample(), &Settings::default()).unwrap();
        assert!(text.contains("model Model::Box extends Model::BaseModel"), "{text}");
        assert!(text.contains("parts: Part[] = []"), "{text}");
        assert!(text.contains("addPart(part: Model::Part) -> self"), "{text}");
        assert!(text.contains("label: string (required)"), "{text}");
        assert!(text.contains("setLabel(label) -> self"), "{text}");
        assert!(text.contains("# shown on the lid"), "{text}");
    }

    #[test]
    fn outline_layout() {
        let mut model = sample();
        model.properties.truncate(1);
        let text = OutlineEmitter.emit_type(&model, &Settings::default()).unwrap();
        let expected = [
            format!("# {GENERATED_NOTICE}"),
            "model Model::Box extends Model::BaseModel".to_string(),
            "  # A box of parts".to_string(),
            String::new(),
            "  parts: Part[] = []".to_string(),
            "    getParts() -> Part[]".to_string(),
            "    setParts(parts) -> self".to_string(),
            "    addPart(part: Model::Part) -> self".to_string(),
            String::new(),
        ];
        assert_eq!(text, expected.join("\n"));
    }

    #[test]
    fn writes_models_and_base_under_namespace() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings { namespace: "Acme::Model".into(), ..Settings::default() };
        let model = sample();
        let written = write_models(dir.path(), [&model], &settings, &JsonEmitter, false).unwrap();

        let target = dir.path().join("Acme").join("Model");
        assert_eq!(written, vec![target.join("Box.json"), target.join("BaseModel.json")]);
        let base = std::fs::read_to_string(target.join("BaseModel.json")).unwrap();
        assert!(base.contains("\"base\": true"));
        assert!(target.join("Box.json").exists());
    }

    #[test]
    fn model_named_like_the_base_type_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let model = OutputType { name: "BaseModel".into(), ..sample() };
        for dry_run in [true, false] {
            let err = write_models(dir.path(), [&model], &Settings::default(), &JsonEmitter, dry_run).unwrap_err();
            match err {
                Error::FileCollision { path, name } => {
                    assert_eq!(name, "BaseModel");
                    assert_eq!(path, dir.path().join("Model").join("BaseModel.json"));
                }
                other => panic!("unexpected error: {other}"),
            }
        }
        assert!(!dir.path().join("Model").exists());
    }

    #[test]
    fn models_sharing_a_name_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (first, second) = (sample(), sample());
        let err = write_models(dir.path(), [&first, &second], &Settings::default(), &OutlineEmitter, false).unwrap_err();
        assert!(matches!(err, Error::FileCollision { ref name, .. } if name == "Box"), "{err}");
        assert!(!dir.path().join("Model").exists());
    }

    #[test]
    fn dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let model = sample();
        let planned = write_models(dir.path(), [&model], &Settings::default(), &OutlineEmitter, true).unwrap();
        assert_eq!(planned.len(), 2);
        assert!(planned.iter().all(|p| !p.exists()));
        assert!(!dir.path().join("Model").exists());
    }
}
