//! Command-line demo: load a dungeon configuration, run a search and print
//! the result over an ASCII map.
//!
//! ```text
//! delve-demo --config delve.json --from 0,0 --to 9,9
//! delve-demo --config delve.json --from 4,4 --radius 2,2
//! delve-demo --config delve.json --toggle 35,35 --save
//! ```

use std::collections::HashSet;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use delve_core::{Grid, GridCell, Point, Terrain, Vec2};
use delve_map::{DelveConfig, MapEditor, MapError};

/// Grid pathfinding demo for delve.
#[derive(Parser, Debug)]
#[command(name = "delve-demo")]
#[command(version)]
struct Args {
    /// Configuration file; created with defaults when missing
    #[arg(short, long, default_value = "delve.json")]
    config: PathBuf,

    /// Start cell as `x,y`
    #[arg(long, value_parser = parse_point, default_value = "0,0")]
    from: Point,

    /// Destination cell as `x,y`
    #[arg(long, value_parser = parse_point)]
    to: Option<Point>,

    /// Show every cell reachable within `rx,ry` of the start instead
    #[arg(long, value_parser = parse_point, conflicts_with = "to")]
    radius: Option<Point>,

    /// Toggle walkability of the cell under world position `x,y` (repeatable)
    #[arg(long, value_parser = parse_world_point)]
    toggle: Vec<Vec2>,

    /// Save the layout to the configured map file
    #[arg(long)]
    save: bool,
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in `{s}`: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in `{s}`: {e}"))?;
    Ok(Point::new(x, y))
}

fn parse_world_point(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in `{s}`: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in `{s}`: {e}"))?;
    Ok(Vec2::new(x, y))
}

/// Map rows top first: `#` blocked, `~` difficult, `.` open, `*` marked,
/// `@` start.
fn render(grid: &Grid<GridCell>, start: Point, marked: &HashSet<Point>) -> String {
    let mut out = String::new();
    for y in (0..grid.height()).rev() {
        for x in 0..grid.width() {
            let p = Point::new(x, y);
            let ch = match grid.at(p) {
                _ if p == start => '@',
                _ if marked.contains(&p) => '*',
                Some(c) if !c.is_walkable() => '#',
                Some(c) if c.is_difficult_terrain() => '~',
                _ => '.',
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

/// Apply `--toggle` and `--save`. Returns `false` when the configuration
/// has the editor disabled and nothing was changed.
fn edit_map(config: &DelveConfig, grid: &mut Grid<GridCell>, args: &Args) -> Result<bool, MapError> {
    if args.toggle.is_empty() && !args.save {
        return Ok(true);
    }
    let Some(editor) = MapEditor::from_config(config) else {
        log::warn!(
            "editor_enabled is off in {}, ignoring --toggle/--save",
            args.config.display()
        );
        return Ok(false);
    };
    for &point in &args.toggle {
        match editor.toggle_at(grid, point) {
            Some(open) => println!("{point}: {}", if open { "open" } else { "blocked" }),
            None => log::warn!("{point} is outside the map"),
        }
    }
    if args.save {
        let settings = editor.save(grid)?;
        println!(
            "saved {} blocked tiles to {}",
            settings.unwalkable_tiles.len(),
            editor.file().display()
        );
    }
    Ok(true)
}

fn run(args: Args) -> Result<(), MapError> {
    let config = DelveConfig::read_from_disk(&args.config)?;
    let mut pathfinder = config.build_pathfinder()?;
    edit_map(&config, pathfinder.grid_mut(), &args)?;

    let grid = pathfinder.grid();
    let mut marked = HashSet::new();
    if let Some(r) = args.radius {
        let paths = pathfinder.find_paths_in_radius(args.from, r.x, r.y);
        println!("{} cells reachable from {}", paths.len(), args.from);
        marked.extend(paths.iter().filter_map(|p| p.destination().map(Terrain::pos)));
    } else if let Some(to) = args.to {
        let path = pathfinder.find_path(args.from, to);
        if path.is_empty() {
            println!("no path from {} to {to}", args.from);
        } else {
            println!(
                "{} steps, cost {} (search cost {})",
                path.len(),
                path.cost(),
                path.search_cost()
            );
            let waypoints: Vec<String> = path.world_path().iter().map(Vec2::to_string).collect();
            println!("waypoints: {}", waypoints.join(" "));
            marked.extend(path.points());
        }
    }

    print!("{}", render(grid, args.from, &marked));
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    log::debug!("{args:?}");
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_points() {
        assert_eq!(parse_point("3, 4"), Ok(Point::new(3, 4)));
        assert!(parse_point("3").is_err());
        assert!(parse_point("a,1").is_err());
        assert_eq!(parse_world_point("1.5,-2"), Ok(Vec2::new(1.5, -2.0)));
    }

    #[test]
    fn editing_respects_editor_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let map = dir.path().join("map.json");
        let args = Args::parse_from(["delve-demo", "--toggle", "5,5", "--save"]);
        let mut config = DelveConfig {
            map_file: Some(map.clone()),
            ..DelveConfig::default()
        };

        let mut grid = config.build_grid().unwrap();
        assert!(!edit_map(&config, &mut grid, &args).unwrap());
        assert!(grid.cell(0, 0).unwrap().is_walkable());
        assert!(!map.exists());

        config.editor_enabled = true;
        assert!(edit_map(&config, &mut grid, &args).unwrap());
        assert!(!grid.cell(0, 0).unwrap().is_walkable());
        assert!(map.exists());
    }

    #[test]
    fn renders_top_row_first() {
        let mut grid = DelveConfig {
            width: 3,
            height: 2,
            ..DelveConfig::default()
        }
        .build_grid()
        .unwrap();
        grid.update_cell(2, 1, |c| c.set_walkable(false)).unwrap();
        grid.update_cell(1, 1, |c| c.set_difficult_terrain(true))
            .unwrap();
        let marked = HashSet::from([Point::new(1, 0)]);
        assert_eq!(render(&grid, Point::new(0, 0), &marked), ".~#\n@*.\n");
    }
}
