use std::path::PathBuf;

use folder_lens::app::engine::Engine;
use folder_lens::host::OsFileSystem;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut engine = Engine::new(Box::new(OsFileSystem));

    let requested = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| engine.state().config.last_directory.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let path = requested.canonicalize().unwrap_or(requested);

    if let Err(err) = engine.load(&path.to_string_lossy()).await {
        tracing::error!("Failed to load {}: {}", path.display(), err);
        std::process::exit(1);
    }

    engine.expand_all();

    let state = engine.state();
    println!("{}", state.current_path);
    if state.root.is_git_repo {
        match &state.root.git_branch {
            Some(branch) => println!("git repository on branch {branch}"),
            None => println!("git repository"),
        }
    }
    print!("{}", String::from_utf8_lossy(&engine.export_text()));

    let summary = engine.tag_summary();
    if !summary.is_empty() {
        println!();
        for (tag, count) in summary {
            println!("#{tag} ({count})");
        }
    }
}
