use finder_core::favorites::{Favorites, MemorySlot, Slot};
use finder_core::{
    AnalysisResult, FavoritesRepository, FileFavorites, FilterAnalysis, Founder, GroundingSource,
    MemoryFavorites, StorageConfig, StorageError, Verdict,
};
use std::cell::RefCell;
use tempfile::TempDir;

/// Slot whose reads always fail; records every write.
#[derive(Default)]
struct UnreadableSlot {
    writes: RefCell<Vec<String>>,
    cleared: RefCell<bool>,
}

impl Slot for UnreadableSlot {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Err(StorageError::io(
            "favorites.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        ))
    }

    fn store(&self, value: &str) -> Result<(), StorageError> {
        self.writes.borrow_mut().push(value.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.cleared.borrow_mut() = true;
        Ok(())
    }
}

fn create_test_favorites() -> (FileFavorites, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let config = StorageConfig {
        data_dir: temp_dir.path().to_string_lossy().to_string(),
        ..StorageConfig::default()
    };
    (FileFavorites::from_config(&config), temp_dir)
}

fn sample(name: &str) -> AnalysisResult {
    let mut result = AnalysisResult::new(name);
    result.twitter_url = format!("https://x.com/{}", name.to_lowercase());
    result.overall_score = 64;
    result.score_rationale = "Needs more observation".to_string();
    result.founders.push(Founder {
        name: "Grace Hopper".to_string(),
        achievements: "Compilers".to_string(),
        image_url: String::new(),
        profile_url: String::new(),
    });
    result.filter_analysis.push(FilterAnalysis {
        filter_name: "Audit / Security".to_string(),
        description: "Partial audit by a known firm".to_string(),
        verdict: Verdict::Neutral,
        level: "Partial".to_string(),
    });
    result.airdrop_tasks.push("Provide liquidity".to_string());
    result
        .grounding_attribution
        .push(GroundingSource::new("Docs", "https://docs.example"));
    result.prime_source = Some(GroundingSource::new("Mention", "https://x.com/vc/status/1"));
    result
}

#[test]
fn test_empty_when_nothing_stored() {
    let (favorites, _temp) = create_test_favorites();
    assert!(favorites.list().is_empty());
    assert!(!favorites.contains("X"));
}

#[test]
fn test_add_twice_keeps_one() {
    let (favorites, _temp) = create_test_favorites();

    favorites.add(&sample("X"));
    let list = favorites.add(&sample("X"));

    assert_eq!(list.len(), 1);
    assert_eq!(favorites.list().len(), 1);
    assert_eq!(favorites.list()[0].project_name, "X");
}

#[test]
fn test_add_keeps_insertion_order() {
    let (favorites, _temp) = create_test_favorites();

    favorites.add(&sample("B"));
    favorites.add(&sample("A"));
    favorites.add(&sample("C"));

    let names: Vec<String> = favorites.list().into_iter().map(|f| f.project_name).collect();
    assert_eq!(names, vec!["B", "A", "C"]);
}

#[test]
fn test_remove_missing_is_noop() {
    let (favorites, _temp) = create_test_favorites();
    favorites.add(&sample("X"));

    let list = favorites.remove("does-not-exist");
    assert_eq!(list.len(), 1);
    assert!(favorites.contains("X"));
}

#[test]
fn test_remove_existing() {
    let (favorites, _temp) = create_test_favorites();
    favorites.add(&sample("X"));
    favorites.add(&sample("Y"));

    favorites.remove("X");
    assert!(!favorites.contains("X"));
    assert!(favorites.contains("Y"));
}

#[test]
fn test_corrupted_file_is_cleared() {
    let (favorites, _temp) = create_test_favorites();
    favorites.slot().store("{ this is not json").unwrap();

    assert!(favorites.list().is_empty());
    assert!(!favorites.slot().path().exists());
    assert!(favorites.list().is_empty());
}

#[test]
fn test_corrupted_memory_slot_is_cleared() {
    let favorites = Favorites::new(MemorySlot::with_value("[{\"projectName\": 5}]"));

    assert!(favorites.list().is_empty());
    assert_eq!(favorites.slot().load().unwrap(), None);
}

#[test]
fn test_persisted_across_instances() {
    let (favorites, temp) = create_test_favorites();
    favorites.add(&sample("Persisted"));

    let reopened = FileFavorites::at(temp.path().join("favorites.json"));
    assert!(reopened.contains("Persisted"));
}

#[test]
fn test_roundtrip_reproduces_list() {
    let favorites = MemoryFavorites::in_memory();
    let originals = vec![sample("One"), sample("Two"), AnalysisResult::new("Bare")];
    for result in &originals {
        favorites.add(result);
    }

    assert_eq!(favorites.list(), originals);

    let json = serde_json::to_string(&originals).unwrap();
    let decoded: Vec<AnalysisResult> = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, originals);
}

#[test]
fn test_stored_format_uses_camel_case() {
    let (favorites, _temp) = create_test_favorites();
    favorites.add(&sample("X"));

    let stored = favorites.slot().load().unwrap().unwrap();
    assert!(stored.contains("\"projectName\""));
    assert!(stored.contains("\"groundingAttribution\""));
    assert!(stored.contains("\"primeSource\""));
}

#[test]
fn test_binary_file_is_cleared() {
    let (favorites, _temp) = create_test_favorites();
    let path = favorites.slot().path().to_path_buf();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, [0xff, 0xfe]).unwrap();

    assert!(favorites.list().is_empty());
    assert!(!path.exists());

    favorites.add(&sample("Fresh"));
    assert_eq!(favorites.list().len(), 1);
}

#[test]
fn test_unreadable_slot_is_never_overwritten() {
    let favorites = Favorites::new(UnreadableSlot::default());

    assert!(favorites.list().is_empty());
    assert!(!favorites.contains("X"));
    assert!(favorites.add(&sample("X")).is_empty());
    assert!(favorites.remove("X").is_empty());

    assert!(favorites.slot().writes.borrow().is_empty());
    assert!(!*favorites.slot().cleared.borrow());
}
