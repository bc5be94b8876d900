//! World bounds of grouped, transformed nodes

use approx::assert_relative_eq;

use crate::foundation::math::Vec3;
use crate::scene::{NodeId, PrimitiveKind, SceneGraph};

const EPSILON: f32 = 1e-5;

/// Two primitives at x = +1 and x = -1, grouped and closed
fn pair_group(graph: &mut SceneGraph) -> NodeId {
    graph.add_primitive(PrimitiveKind::Cone);
    graph.interface_mut().set_translation(Vec3::new(1.0, 0.0, 0.0));
    graph.apply_pending_transform();

    graph.add_primitive(PrimitiveKind::Sphere);
    graph.interface_mut().set_translation(Vec3::new(-1.0, 0.0, 0.0));
    graph.apply_pending_transform();

    graph.add_selected_to_group();
    graph.add_selected_to_group();
    graph.close_group();
    graph.current().unwrap()
}

#[test]
fn test_group_bounds_cover_both_children() {
    let mut graph = SceneGraph::new();
    let group = pair_group(&mut graph);

    let bounds = graph.world_bounds(group).unwrap();
    assert_relative_eq!(bounds.min, Vec3::new(-1.5, -0.5, -0.5), epsilon = EPSILON);
    assert_relative_eq!(bounds.max, Vec3::new(1.5, 0.5, 0.5), epsilon = EPSILON);
}

#[test]
fn test_group_transform_applies_to_union() {
    let mut graph = SceneGraph::new();
    let group = pair_group(&mut graph);

    graph.interface_mut().set_rotation_delta(Vec3::new(0.0, 0.0, 90.0));
    graph.interface_mut().set_translation(Vec3::new(0.0, 0.0, 2.0));
    graph.apply_pending_transform();

    let bounds = graph.world_bounds(group).unwrap();
    assert_relative_eq!(bounds.min, Vec3::new(-0.5, -1.5, 1.5), epsilon = EPSILON);
    assert_relative_eq!(bounds.max, Vec3::new(0.5, 1.5, 2.5), epsilon = EPSILON);
}

#[test]
fn test_scaled_primitive_bounds() {
    let mut graph = SceneGraph::new();
    let cone = graph.add_primitive(PrimitiveKind::Cone);
    graph.interface_mut().set_scale(Vec3::new(2.0, 1.0, 4.0));
    graph.apply_pending_transform();

    let bounds = graph.world_bounds(cone).unwrap();
    assert_relative_eq!(bounds.min, Vec3::new(-1.0, -0.5, -2.0), epsilon = EPSILON);
    assert_relative_eq!(bounds.max, Vec3::new(1.0, 0.5, 2.0), epsilon = EPSILON);
}

#[test]
fn test_scene_bounds_include_root_box_and_open_group() {
    let mut graph = SceneGraph::new();
    let empty = graph.scene_bounds();
    assert_relative_eq!(empty.min, Vec3::repeat(-1.0), epsilon = EPSILON);
    assert_relative_eq!(empty.max, Vec3::repeat(1.0), epsilon = EPSILON);

    pair_group(&mut graph);
    graph.add_primitive(PrimitiveKind::Torus);
    graph.interface_mut().set_translation(Vec3::new(0.0, 0.0, -5.0));
    graph.apply_pending_transform();
    graph.add_selected_to_group();
    assert!(graph.has_open_group());

    let bounds = graph.scene_bounds();
    assert_relative_eq!(bounds.min, Vec3::new(-1.5, -1.0, -5.5), epsilon = EPSILON);
    assert_relative_eq!(bounds.max, Vec3::new(1.5, 1.0, 1.0), epsilon = EPSILON);
}
