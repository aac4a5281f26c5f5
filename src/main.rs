//! `aoi-sketch`: command-line access to the stored AOIs.
//!
//! - `aoi-sketch [list]` prints every stored AOI.
//! - `aoi-sketch clear` removes them all.
//! - `aoi-sketch init-config` writes the current settings to the config file.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use aoi_sketch::store::FileBlobStore;
    use aoi_sketch::{AppConfig, FeatureStore, format_area};

    let config = AppConfig::load_from_default_path().unwrap_or_default();
    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .parse_default_env()
        .init();

    let Some(dir) = FileBlobStore::default_dir() else {
        eprintln!("Could not determine data directory");
        std::process::exit(1);
    };
    let mut store = FeatureStore::new(FileBlobStore::new(&dir)).with_key(config.storage_key.clone());
    if let Some(seed) = config.color_seed {
        store = store.with_color_seed(seed);
    }
    store.load();

    let command = std::env::args().nth(1);
    if command.as_deref() == Some("init-config") {
        match config.save_to_default_path() {
            Ok(()) => {
                if let Some(path) = AppConfig::default_path() {
                    println!("Wrote {}", path.display());
                }
            }
            Err(e) => {
                eprintln!("Failed to write config: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    match command.as_deref() {
        None | Some("list") => {}
        Some("clear") => {
            let count = store.len();
            store.clear();
            println!("Removed {} AOIs from {}", count, dir.display());
            return;
        }
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            eprintln!("Usage: aoi-sketch [list|clear|init-config]");
            std::process::exit(2);
        }
    }

    if store.is_empty() {
        println!("No AOIs stored in {}", dir.display());
        return;
    }
    for feature in store.features() {
        let area = feature.area.map(format_area).unwrap_or_else(|| "-".to_string());
        println!(
            "{:<24} {:<10} {:>14}  {}",
            feature.name,
            feature.kind().name(),
            area,
            feature.created_at.format("%Y-%m-%d %H:%M")
        );
    }
}

// WASM builds use the library directly
#[cfg(target_arch = "wasm32")]
fn main() {}
