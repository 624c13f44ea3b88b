use glam::Vec3;

use edge_view::backend::{Context, Renderer};
use edge_view::camera::PerspectiveCamera;
use edge_view::error::ViewError;
use edge_view::geometry::{EdgeGeometry, GeometryLayout};
use edge_view::mesh::{Cell, CellKind, PolyMesh};
use edge_view::render::{LoopState, RenderLoop, ACCUMULATED_FRAME, FIRST_FRAME};
use edge_view::{assemble_world, extract_edges, RenderMode, RenderSettings};

fn camera_for(settings: &RenderSettings) -> PerspectiveCamera {
    PerspectiveCamera::new(
        settings.camera_position,
        settings.camera_direction,
        settings.camera_up,
        settings.aspect(),
        settings.camera_fovy,
    )
}

/// Settings small enough to run the full loop quickly in tests.
fn small_settings() -> RenderSettings {
    RenderSettings {
        image_width: 64,
        image_height: 48,
        ..RenderSettings::default()
    }
}

fn unique_temp_dir(tag: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("edge-view-{}-{}", tag, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

mod extraction {
    use super::*;

    #[test]
    fn test_empty_mesh_is_an_empty_geometry_error() {
        // Scenario: 0 points, 0 cells.
        let mesh = PolyMesh::default();
        let edges = extract_edges(&mesh).unwrap();
        let err = EdgeGeometry::build(&edges, GeometryLayout::RoundCurve, 0.005).unwrap_err();
        assert!(matches!(err, ViewError::EmptyGeometry));
    }

    #[test]
    fn test_out_of_range_cell_aborts_before_assembly() {
        // Scenario: a line cell referencing point 100 of a 10-point mesh.
        let points = (0..10).map(|i| Vec3::splat(i as f32)).collect();
        let mesh = PolyMesh::new(points, vec![Cell::line(0, 100)]);
        let err = extract_edges(&mesh).unwrap_err();
        assert!(matches!(err, ViewError::IndexOutOfRange { index: 100, .. }));
    }

    #[test]
    fn test_edge_count_equals_line_cell_count() {
        let points = vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z];
        let cells = vec![
            Cell::line(0, 1),
            Cell {
                kind: CellKind::Polygon,
                point_ids: vec![0, 1, 2],
            },
            Cell::line(1, 2),
            Cell {
                kind: CellKind::Vertex,
                point_ids: vec![3],
            },
            Cell::line(2, 3),
        ];
        let mesh = PolyMesh::new(points, cells);
        let edges = extract_edges(&mesh).unwrap();
        assert_eq!(edges.len(), 3, "exactly the line cells become edges");
    }
}

mod geometry_buffers {
    use super::*;

    #[test]
    fn test_four_points_two_lines_buffer_shape() {
        // Scenario: 4 points, 2 valid line cells.
        let points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let mesh = PolyMesh::new(points, vec![Cell::line(0, 1), Cell::line(2, 3)]);
        let edges = extract_edges(&mesh).unwrap();
        let geometry = EdgeGeometry::build(&edges, GeometryLayout::RoundCurve, 0.005).unwrap();

        assert_eq!(geometry.vertices().len(), 4);
        assert_eq!(geometry.indices(), &[0, 2]);
    }

    #[test]
    fn test_assembly_is_a_pure_function_of_the_edges() {
        let points = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        let mesh = PolyMesh::new(points, vec![Cell::line(0, 1), Cell::line(1, 2)]);
        let edges = extract_edges(&mesh).unwrap();

        let build = || {
            let geometry =
                EdgeGeometry::build(&edges, GeometryLayout::RoundCurve, 0.005).unwrap();
            assemble_world(geometry, RenderMode::PathTraced)
        };
        let a = build();
        let b = build();
        let ga = a.instance().group().model().geometry();
        let gb = b.instance().group().model().geometry();
        assert_eq!(ga.vertices(), gb.vertices());
        assert_eq!(ga.indices(), gb.indices());
    }
}

mod render_loop {
    use super::*;

    #[test]
    fn test_full_loop_writes_both_checkpoints() {
        let settings = small_settings();
        let ctx = Context::init(settings).unwrap();

        let points = vec![
            Vec3::new(0.0, 0.0, -2.0),
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(-2.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        ];
        let mesh = PolyMesh::new(points, vec![Cell::line(0, 1), Cell::line(2, 3)]);
        let edges = extract_edges(&mesh).unwrap();
        let geometry =
            EdgeGeometry::build(&edges, GeometryLayout::RoundCurve, settings.edge_radius).unwrap();
        let world = assemble_world(geometry, RenderMode::PathTraced);
        let renderer = Renderer::new(&ctx, RenderMode::PathTraced, &world);
        let camera = camera_for(&settings);

        let dir = unique_temp_dir("loop");
        let mut render_loop = RenderLoop::new(&ctx, &dir);
        assert_eq!(render_loop.state(), LoopState::Uninitialized);
        render_loop.run(&renderer, &camera, &world);
        assert_eq!(render_loop.state(), LoopState::Done);

        for name in [FIRST_FRAME, ACCUMULATED_FRAME] {
            let path = dir.join(name);
            let data = std::fs::read(&path)
                .unwrap_or_else(|_| panic!("checkpoint {} missing", path.display()));
            let header = b"P6\n64 48\n255\n";
            assert_eq!(&data[..header.len()], header);
            assert_eq!(data.len(), header.len() + 64 * 48 * 3);
        }

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unwritable_destination_does_not_abort() {
        // Scenario: the output directory cannot be created into.
        let settings = small_settings();
        let ctx = Context::init(settings).unwrap();

        let points = vec![Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)];
        let mesh = PolyMesh::new(points, vec![Cell::line(0, 1)]);
        let edges = extract_edges(&mesh).unwrap();
        let geometry =
            EdgeGeometry::build(&edges, GeometryLayout::RoundCurve, settings.edge_radius).unwrap();
        let world = assemble_world(geometry, RenderMode::RayCast);
        let renderer = Renderer::new(&ctx, RenderMode::RayCast, &world);
        let camera = camera_for(&settings);

        let missing = std::env::temp_dir().join("edge-view-no-such-dir/deeper");
        let mut render_loop = RenderLoop::new(&ctx, &missing);
        render_loop.run(&renderer, &camera, &world);

        // The loop ran both stages; the files simply do not exist.
        assert_eq!(render_loop.state(), LoopState::Done);
        assert!(!missing.join(FIRST_FRAME).exists());
        assert!(!missing.join(ACCUMULATED_FRAME).exists());
    }
}

mod configuration {
    use super::*;

    #[test]
    fn test_fixed_image_size_is_1024_by_768() {
        let settings = RenderSettings::default();
        assert_eq!((settings.image_width, settings.image_height), (1024, 768));
    }

    #[test]
    fn test_backend_rejects_degenerate_settings_with_its_code() {
        let settings = RenderSettings {
            image_height: 0,
            ..RenderSettings::default()
        };
        let err = Context::init(settings).unwrap_err();
        let err = ViewError::from(err);
        assert_eq!(err.exit_code(), 2);
    }
}
