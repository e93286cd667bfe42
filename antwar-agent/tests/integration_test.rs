//! Integration tests for the ANTWAR agents
//!
//! Tests the full stack: engine rules, search, evolution and the game runner

use antwar_agent::{AgentConfig, GameRunner, GeneticAgent, Player, ReactiveAgent, RunnerConfig};
use antwar_core::{GameResult, Phase, PlayerId, SearchConfig};
use antwar_evolve::EvolutionConfig;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn fast_evolution() -> EvolutionConfig {
    EvolutionConfig::default()
        .with_population_size(2)
        .with_games_per_genome(1)
}

fn genetic(seed: u64) -> GeneticAgent {
    let config = AgentConfig::default()
        .with_seed(seed)
        .with_evolution(fast_evolution());
    GeneticAgent::new(config).expect("default config is valid")
}

fn runner(max_turns: u32) -> GameRunner {
    GameRunner::new(RunnerConfig::default().with_max_turns(max_turns))
}

// ============================================================================
// FULL GAMES
// ============================================================================

#[test]
fn test_genetic_vs_reactive_completes() {
    init_tracing();
    let mut agent = genetic(1);
    let mut baseline = ReactiveAgent::default();

    let outcome = runner(30).play_game(&mut agent, &mut baseline).unwrap();
    assert!(outcome.turns <= 30);
    assert!(outcome.actions > 0);
    match outcome.result {
        GameResult::Won(_) => assert_eq!(outcome.final_state.phase, Phase::Finished),
        GameResult::Ongoing => assert_eq!(outcome.turns, 30),
    }
    assert_eq!(agent.player_id(), Some(PlayerId::One));
}

#[test]
fn test_genetic_as_second_player() {
    init_tracing();
    let mut baseline = ReactiveAgent::default();
    let mut agent = genetic(2);

    let outcome = runner(20).play_game(&mut baseline, &mut agent).unwrap();
    assert!(outcome.turns <= 20);
    assert_eq!(agent.player_id(), Some(PlayerId::Two));
    let anthill = outcome.final_state.inventory(PlayerId::Two).anthill().unwrap();
    assert!(PlayerId::Two.owns_row(anthill.coords));
}

#[test]
fn test_self_play_with_deeper_search() {
    init_tracing();
    let deeper = AgentConfig::default()
        .with_name("deep")
        .with_seed(3)
        .with_search(SearchConfig::default().with_depth(2))
        .with_evolution(fast_evolution());
    let mut a = GeneticAgent::new(deeper).unwrap();
    let mut b = genetic(4);

    let outcome = runner(10).play_game(&mut a, &mut b).unwrap();
    assert!(outcome.turns <= 10);
}

// ============================================================================
// EVOLUTION ACROSS GAMES
// ============================================================================

#[test]
fn test_generation_advances_after_every_individual_played() {
    init_tracing();
    let mut agent = genetic(5);
    let mut baseline = ReactiveAgent::default();
    let runner = runner(15);

    let first_genome = agent.population().active_phase1().clone();
    runner.play_game(&mut agent, &mut baseline).unwrap();
    assert_eq!(agent.population().current_index(), 1);
    assert_eq!(agent.population().generation(), 0);

    runner.play_game(&mut agent, &mut baseline).unwrap();
    assert_eq!(agent.population().generation(), 1);
    assert_eq!(agent.population().current_index(), 0);

    let phase1 = agent.population().phase1();
    assert_eq!(phase1.len(), 2);
    assert_eq!(phase1.fitness, vec![0.0; 2]);
    assert!(phase1.genomes.iter().all(|g| g.len() == first_genome.len()));
}

#[test]
fn test_all_losses_produce_full_generation() {
    init_tracing();
    let mut agent = genetic(6);
    for _ in 0..2 {
        agent.report_outcome(false);
    }
    assert_eq!(agent.population().generation(), 1);
    assert_eq!(agent.population().phase1().len(), 2);
    assert_eq!(agent.population().phase2().len(), 2);
}

#[test]
fn test_config_file_round_trip_builds_agent() {
    let config = AgentConfig::default().with_name("from-json").with_evolution(fast_evolution());
    let json = config.to_json().unwrap();
    let loaded = AgentConfig::from_json(&json).unwrap();
    let agent = GeneticAgent::new(loaded).unwrap();
    assert_eq!(agent.name(), "from-json");
}
