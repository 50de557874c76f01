use clap::{Parser, Subcommand, ValueEnum};
use informed::{
    domains::{
        EightPuzzle, GraphSpec, KnightDistance, KnightProblem, ManhattanDistance, MisplacedTiles,
        RiverCrossing, Square, Tiles,
    },
    search::{
        validate, Heuristic, Problem, Result, SearchConfig, SearchEngineName, SearchError,
        SearchResult, Verbosity, ZeroHeuristic,
    },
};
use std::{path::PathBuf, process::ExitCode, time::Duration};
use strum::IntoEnumIterator;
use tracing::{error, info};

#[derive(Parser)]
#[command(version)]
/// Run uninformed and informed search engines on small example problems.
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(
        value_enum,
        help = "The search engine to use",
        short = 'e',
        long = "engine",
        id = "ENGINE",
        default_value_t = SearchEngineName::Astar
    )]
    search_engine_name: SearchEngineName,
    #[arg(
        help = "The heuristic weight, overrides the one in the config file",
        short = 'w',
        long = "weight",
        id = "WEIGHT"
    )]
    weight: Option<f64>,
    #[arg(
        help = "A TOML file with the search configuration",
        long = "config",
        id = "CONFIG"
    )]
    config: Option<PathBuf>,
    #[arg(help = "Run every engine and print a comparison table", long = "compare")]
    compare: bool,
    #[arg(help = "Print the search statistics as JSON", long = "json")]
    json: bool,
    #[arg(
        value_enum,
        help = "The verbosity level",
        short = 'v',
        long = "verbosity",
        id = "VERBOSITY",
        default_value_t = Verbosity::Normal
    )]
    verbosity: Verbosity,
    #[arg(help = "Whether to use coloured output", short = 'c', long = "colour")]
    colour: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a weighted graph described in a TOML file, using the
    /// heuristic table from the same file.
    Graph {
        #[arg(help = "The graph file")]
        path: PathBuf,
    },
    /// Solve a 3x3 sliding tile puzzle. Tiles are given row by row with 0
    /// for the blank, e.g. "867254301".
    EightPuzzle {
        #[arg(help = "The starting tiles")]
        tiles: String,
        #[arg(
            value_enum,
            help = "The heuristic to use",
            long = "heuristic",
            id = "HEURISTIC",
            default_value_t = PuzzleHeuristic::Manhattan
        )]
        heuristic: PuzzleHeuristic,
    },
    /// Move a knight between two squares of a square board.
    Knight {
        #[arg(help = "The board size", long = "size", default_value_t = 8)]
        size: i32,
        #[arg(
            help = "The starting square as x,y",
            long = "from",
            value_parser = parse_square,
            default_value = "0,0"
        )]
        from: Square,
        #[arg(
            help = "The target square as x,y",
            long = "to",
            value_parser = parse_square,
            default_value = "7,7"
        )]
        to: Square,
    },
    /// Ferry the farmer, wolf, goat and cabbage across the river.
    RiverCrossing,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum PuzzleHeuristic {
    Zero,
    Misplaced,
    Manhattan,
}

fn parse_square(text: &str) -> std::result::Result<Square, String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected x,y, got {}", text))?;
    let parse = |value: &str| {
        value
            .trim()
            .parse::<i32>()
            .map_err(|e| format!("invalid coordinate {}: {}", value, e))
    };
    Ok((parse(x)?, parse(y)?))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level: tracing::Level = cli.verbosity.into();
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(cli.colour)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match dispatch(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> Result<SearchConfig> {
    let mut config = match &cli.config {
        Some(path) => SearchConfig::from_path(path)?,
        None => SearchConfig::default(),
    };
    if let Some(weight) = cli.weight {
        config.weight = weight;
    }
    config.validate()?;
    Ok(config)
}

fn dispatch(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    match &cli.command {
        Commands::Graph { path } => {
            let (problem, mut heuristic) = GraphSpec::from_path(path)?.into_problem()?;
            run(cli, &config, &problem, &mut heuristic)
        }
        Commands::EightPuzzle { tiles, heuristic } => {
            let problem = EightPuzzle::new(EightPuzzle::parse_tiles(tiles)?)?;
            let goal = *problem.goal_tiles();
            let mut heuristic: Box<dyn Heuristic<Tiles>> = match heuristic {
                PuzzleHeuristic::Zero => Box::new(ZeroHeuristic::new()),
                PuzzleHeuristic::Misplaced => Box::new(MisplacedTiles::for_goal(goal)),
                PuzzleHeuristic::Manhattan => Box::new(ManhattanDistance::for_goal(goal)),
            };
            run(cli, &config, &problem, heuristic.as_mut())
        }
        Commands::Knight { size, from, to } => {
            let problem = KnightProblem::new(*size, *from, *to)?;
            run(cli, &config, &problem, &mut KnightDistance::new(*to))
        }
        Commands::RiverCrossing => run(
            cli,
            &config,
            &RiverCrossing::new(),
            &mut ZeroHeuristic::new(),
        ),
    }
}

fn run<P, H>(cli: &Cli, config: &SearchConfig, problem: &P, heuristic: &mut H) -> Result<()>
where
    P: Problem,
    P::Action: PartialEq,
    H: Heuristic<P::State> + ?Sized,
{
    if cli.compare {
        let mut rows = vec![];
        for engine in SearchEngineName::iter() {
            let result = engine.search(problem, heuristic, config)?;
            check(problem, &result)?;
            rows.push(result);
        }
        print_comparison(&rows);
        return Ok(());
    }

    let result = cli.search_engine_name.search(problem, heuristic, config)?;
    check(problem, &result)?;
    if result.is_solved() {
        println!("Path found:");
        for (step, state) in result.path.iter().enumerate() {
            match step.checked_sub(1).and_then(|i| result.actions.get(i)) {
                Some(action) => println!("  {:?} -> {:?}", action, state),
                None => println!("  {:?}", state),
            }
        }
        println!("Path cost: {}", result.cost);
        println!("Path length: {}", result.path.len());
    } else {
        println!("No path found: {}", result.outcome());
    }

    if cli.json {
        match serde_json::to_string_pretty(&result.statistics) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("failed to serialise statistics: {}", e),
        }
    }
    Ok(())
}

fn check<P>(problem: &P, result: &SearchResult<P::State, P::Action>) -> Result<()>
where
    P: Problem,
    P::Action: PartialEq,
{
    if !result.is_solved() {
        return Ok(());
    }
    info!("validating path");
    match validate(problem, result) {
        Ok(()) => {
            info!("path is valid");
            Ok(())
        }
        Err(e) => Err(SearchError::InconsistentProblem(e.to_string())),
    }
}

fn print_comparison<S, A>(rows: &[SearchResult<S, A>]) {
    println!(
        "{:<22} {:>18} {:>10} {:>10} {:>10} {:>10} {:>6} {:>12}",
        "engine", "outcome", "cost", "expanded", "generated", "frontier", "passes", "time"
    );
    for result in rows {
        let statistics = &result.statistics;
        let time = Duration::from_micros((statistics.search_duration() * 1e6) as u64);
        println!(
            "{:<22} {:>18} {:>10} {:>10} {:>10} {:>10} {:>6} {:>12}",
            statistics.algorithm(),
            result.outcome().to_string(),
            result.cost,
            statistics.expanded_nodes(),
            statistics.generated_nodes(),
            statistics.max_frontier(),
            statistics.iterations(),
            humantime::format_duration(time).to_string(),
        );
    }
}
