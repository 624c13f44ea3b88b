use std::process;

use edge_view::backend::{Context, Renderer};
use edge_view::camera::PerspectiveCamera;
use edge_view::cli::Cli;
use edge_view::config::RenderSettings;
use edge_view::error::ViewError;
use edge_view::geometry::{EdgeGeometry, GeometryLayout};
use edge_view::render::RenderLoop;
use edge_view::{extract_edges, loaders, scene};

fn main() {
    env_logger::init();

    let cli = match Cli::parse_args() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(err.exit_code());
        }
    };

    if let Err(err) = run(&cli) {
        eprintln!("edge-view: {}", err);
        process::exit(err.exit_code());
    }
}

fn run(cli: &Cli) -> Result<(), ViewError> {
    let settings = RenderSettings::default();

    // The whole mesh pipeline runs before the backend comes up, so a bad
    // input file can never leak renderer resources.
    let mesh = loaders::load_mesh(&cli.mesh)?;
    let edges = extract_edges(&mesh)?;
    eprintln!(
        "READ {} {} {}",
        mesh.point_count(),
        mesh.cell_count(),
        edges.len() * 2
    );
    let geometry = EdgeGeometry::build(&edges, GeometryLayout::RoundCurve, settings.edge_radius)?;

    let ctx = Context::init(settings)?;
    let world = scene::assemble_world(geometry, cli.render_mode());
    let camera = PerspectiveCamera::new(
        settings.camera_position,
        settings.camera_direction,
        settings.camera_up,
        settings.aspect(),
        settings.camera_fovy,
    );
    let renderer = Renderer::new(&ctx, cli.render_mode(), &world);

    let mut render_loop = RenderLoop::new(&ctx, ".");
    render_loop.run(&renderer, &camera, &world);
    Ok(())
}
