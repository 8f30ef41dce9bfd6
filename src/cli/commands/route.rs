//! Route command - Print the shortest start-to-goal path

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::{
        config::GridSource,
        output::{print_kv, print_section, print_subsection, render_path},
    },
    shortest_path::{PathEngine, moves_along},
};

#[derive(Parser, Debug)]
#[command(about = "Show the shortest route from start to goal")]
pub struct RouteArgs {
    #[command(flatten)]
    pub source: GridSource,

    /// Print only the move commands, one per line
    #[arg(long, default_value_t = false)]
    pub commands: bool,
}

pub fn execute(args: RouteArgs) -> Result<()> {
    let grid = args.source.load()?;
    let start = grid.start().context("Grid has no start")?;
    let goal = grid.goal().context("Grid has no goal")?;

    let path = PathEngine::default()
        .shortest_path(&grid, start, goal)
        .context("No route from start to goal")?;
    let moves = moves_along(&grid, &path)?;

    if args.commands {
        for step in &moves {
            println!("{}", step.command());
        }
        return Ok(());
    }

    print_section("Shortest Route");
    print_kv("Start", &format!("{start} {:?}", grid.coordinates(start)));
    print_kv("Goal", &format!("{goal} {:?}", grid.coordinates(goal)));
    print_kv("Path length", &path.len().to_string());
    print_kv("Moves", &moves.len().to_string());

    print_subsection("Moves");
    let names: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
    println!("{}", names.join(" "));

    print_subsection("Map");
    println!("{}", render_path(&grid, &path));
    Ok(())
}
