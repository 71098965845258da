//! Tests for persisting trained trees and reloading them

use dropfour::{
    BoardSize, MatchRunner, Player, Seat, TrainingConfig,
    adapters::{InMemoryRepository, MsgPackRepository},
    app::{AgentConfig, App},
    ports::TreeRepository,
};
use tempfile::TempDir;

fn agent_config() -> AgentConfig {
    AgentConfig::new(BoardSize::new(5, 5).unwrap()).with_seed(13)
}

fn train_for(episodes: usize, app: &App) -> dropfour::QAgent {
    let mut agent = app.create_agent(Seat::One, &agent_config()).unwrap();
    let mut opponent = Player::random(Some(31));
    let config = TrainingConfig {
        episodes,
        seed: Some(77),
        ..TrainingConfig::default()
    };
    MatchRunner::new(config)
        .run(&mut agent, &mut opponent)
        .unwrap();
    agent
}

#[test]
fn trained_tree_roundtrips_through_msgpack() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("p1_tree.msgpack");

    let app = App::new();
    let agent = train_for(50, &app);
    let tree = agent.tree();

    let repo = MsgPackRepository::new();
    repo.save(tree, &file_path).expect("Failed to save");
    assert!(file_path.exists());

    let loaded = repo.load(&file_path).expect("Failed to load");

    assert_eq!(loaded.node_count(), tree.node_count());
    assert_eq!(loaded.board_size(), tree.board_size());
    assert_eq!(loaded.learning_rate(), tree.learning_rate());
    assert_eq!(loaded.discount(), tree.discount());
    assert_eq!(loaded.reward(), tree.reward());

    // Every root entry, including learned values, survives the roundtrip.
    let root = tree.root();
    for (&mv, &value) in tree.action_values(root) {
        assert_eq!(loaded.action_value(loaded.root(), mv), Some(value));
    }
    for (&mv, &child) in tree.children(root) {
        assert_eq!(loaded.find_child(loaded.root(), mv), Some(child));
    }
}

#[test]
fn reloaded_tree_continues_training() {
    let repo = InMemoryRepository::new();
    let app = App::for_testing()
        .with_repository(repo.clone())
        .build();
    let agent = train_for(30, &app);
    let trained_nodes = agent.tree().node_count();

    let path = std::path::Path::new("trees/p1");
    app.save_agent(&agent, path).unwrap();

    let mut resumed = app.load_agent(Seat::One, path, Some(5)).unwrap();
    assert_eq!(resumed.tree().node_count(), trained_nodes);

    let mut opponent = Player::random(Some(6));
    let config = TrainingConfig {
        episodes: 20,
        seed: Some(8),
        ..TrainingConfig::default()
    };
    MatchRunner::new(config)
        .run(&mut resumed, &mut opponent)
        .unwrap();
    assert!(resumed.tree().node_count() >= trained_nodes);
}

#[test]
fn missing_tree_surfaces_a_recoverable_error() {
    let app = App::for_testing()
        .with_repository(InMemoryRepository::new())
        .build();

    let missing = std::path::Path::new("no/such/tree");
    assert!(app.load_agent(Seat::One, missing, None).is_err());

    // The documented fallback: construct a fresh agent instead.
    let agent = app
        .load_agent_or_fresh(Seat::One, missing, &agent_config())
        .unwrap();
    assert_eq!(agent.tree().node_count(), 1);
}

#[test]
fn corrupt_file_is_a_load_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("garbage.msgpack");
    std::fs::write(&file_path, b"not a tree").unwrap();

    let repo = MsgPackRepository::new();
    assert!(repo.load(&file_path).is_err());
}
