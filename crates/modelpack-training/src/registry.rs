use crate::artifacts::BestModelManifest;
use crate::layout::{MODEL_EXTENSION, file_name, model_file_name, normalize_path};
use serde::Serialize;

/// A result file listed in a job's best-model manifest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManifestCandidate {
    pub category: String,
    pub stage: String,
    pub path: String,
    pub metric: f64,
    /// Name accepted by `find_model_path`, when the file is a `.kaier` model.
    pub model_name: Option<String>,
}

/// Find the manifest path whose file name ends with `<model_name>.kaier`.
///
/// Tie-break: the first match in manifest traversal order (category key
/// ascending, then stage key ascending, then result order) wins. The path is
/// returned exactly as written in the manifest.
#[must_use]
pub fn find_model_path<'a>(manifest: &'a BestModelManifest, model_name: &str) -> Option<&'a str> {
    let wanted = model_file_name(model_name);
    manifest
        .entries()
        .map(|(_, _, entry)| entry.path())
        .find(|path| file_name(&normalize_path(path)).ends_with(wanted.as_str()))
}

/// All manifest entries in traversal order.
#[must_use]
pub fn list_candidates(manifest: &BestModelManifest) -> Vec<ManifestCandidate> {
    let suffix = format!(".{MODEL_EXTENSION}");
    manifest
        .entries()
        .map(|(category, stage, entry)| {
            let normalized = normalize_path(entry.path());
            let model_name =
                file_name(&normalized).strip_suffix(suffix.as_str()).map(str::to_string);
            ManifestCandidate {
                category: category.to_string(),
                stage: stage.to_string(),
                path: entry.path().to_string(),
                metric: entry.metric(),
                model_name,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::ResultEntry;
    use proptest::prelude::*;

    fn manifest(payload: &str) -> BestModelManifest {
        BestModelManifest::parse(payload).unwrap()
    }

    #[test]
    fn test_find_model_path_matches_suffix() {
        let m = manifest(r#"{"cls":{"stage1":[["/data/42/resnet50.kaier", 0.91]]}}"#);
        assert_eq!(find_model_path(&m, "resnet50"), Some("/data/42/resnet50.kaier"));
        assert_eq!(find_model_path(&m, "nonexistent"), None);
    }

    #[test]
    fn test_find_model_path_ignores_directory_components() {
        let m = manifest(r#"{"cls":{"s":[["/data/resnet50.kaier/other.kaier", 0.5]]}}"#);
        assert_eq!(find_model_path(&m, "resnet50"), None);
    }

    #[test]
    fn test_find_model_path_requires_model_extension() {
        let m = manifest(r#"{"cls":{"s":[["/data/42/resnet50.onnx", 0.5]]}}"#);
        assert_eq!(find_model_path(&m, "resnet50"), None);
    }

    #[test]
    fn test_find_model_path_handles_windows_paths() {
        let m = manifest(r#"{"cls":{"s":[["D:\\data\\42\\resnet50.kaier", 0.5]]}}"#);
        assert_eq!(find_model_path(&m, "resnet50"), Some(r"D:\data\42\resnet50.kaier"));
    }

    #[test]
    fn test_find_model_path_first_match_wins() {
        let m = manifest(
            r#"{"b":{"s1":[["/b/s1/m.kaier", 0.1]]},
                "a":{"s2":[["/a/s2/m.kaier", 0.2]],"s1":[["/a/s1/m.kaier", 0.3],["/a/s1/x/m.kaier", 0.4]]}}"#,
        );
        assert_eq!(find_model_path(&m, "m"), Some("/a/s1/m.kaier"));
    }

    #[test]
    fn test_list_candidates() {
        let m = manifest(r#"{"cls":{"stage1":[["/d/resnet50.kaier", 0.91],["/d/report.csv", 0.0]]}}"#);
        let candidates = list_candidates(&m);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].model_name.as_deref(), Some("resnet50"));
        assert_eq!(candidates[0].category, "cls");
        assert_eq!(candidates[0].stage, "stage1");
        assert_eq!(candidates[1].model_name, None);
    }

    proptest! {
        #[test]
        fn prop_recorded_model_is_found_verbatim(
            dir in "(/[a-z0-9]{1,6}){1,4}",
            name in "[a-z][a-z0-9_]{0,12}",
            category in "[a-z]{1,6}",
            stage in "[a-z0-9]{1,6}",
        ) {
            let path = format!("{dir}/{name}.kaier");
            let mut m = BestModelManifest::default();
            m.insert(&category, &stage, ResultEntry(path.clone(), 0.5));
            prop_assert_eq!(find_model_path(&m, &name), Some(path.as_str()));
            prop_assert_eq!(find_model_path(&m, &format!("{name}x")), None);
        }
    }
}
