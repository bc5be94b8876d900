//! Editable scene graph
//!
//! A tree of nodes rooted at a single group, with one "current" node that the
//! interface controls edit and at most one "open group" being assembled
//! outside the tree. Invalid requests (closing when nothing is open,
//! reopening a primitive, ...) are silent no-ops; callers that need to grey
//! out controls query [`SceneGraph::has_current`] and
//! [`SceneGraph::has_open_group`].
//!
//! Nodes live in a slot map and refer to each other by [`NodeId`], so a
//! stale handle resolves to `None` instead of dangling.

use std::fmt;
use std::io;

use slotmap::SlotMap;

use crate::core::config::SceneConfig;
use crate::scene::bounds::AABB;
use crate::scene::interface::InterfaceTransform;
use crate::scene::node::{Node, NodeId, PrimitiveKind};

/// Mutable, selectable, groupable tree of drawable nodes
#[derive(Debug)]
pub struct SceneGraph {
    /// Storage for every node, attached or not
    nodes: SlotMap<NodeId, Node>,

    /// The top-level group; always valid
    root: NodeId,

    /// Node targeted by the interface controls
    current: Option<NodeId>,

    /// Detached group under construction
    open_group: Option<NodeId>,

    /// UI mirror of the current node's transform
    interface: InterfaceTransform,

    /// Defaults for new nodes
    config: SceneConfig,
}

impl SceneGraph {
    /// Creates an empty scene graph with default settings
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    /// Creates an empty scene graph using the given scene settings
    pub fn with_config(config: SceneConfig) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Self::make_root(&config));

        Self {
            root,
            nodes,
            current: None,
            open_group: None,
            interface: InterfaceTransform::new(config.scale_min, config.scale_max),
            config,
        }
    }

    fn make_root(config: &SceneConfig) -> Node {
        let mut root = Node::group(config.default_color, config.root_axis_scale);
        root.local_bounds = AABB::cube(1.0);
        root
    }

    /// Drops every node and starts over with an empty root
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = self.nodes.insert(Self::make_root(&self.config));
        self.current = None;
        self.open_group = None;
        self.interface.reset();
        log::info!("Scene graph cleared");
    }

    /// The root group
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The current node, if any
    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// Whether a node is currently selected
    pub fn has_current(&self) -> bool {
        self.current.is_some()
    }

    /// The open group, if any
    pub fn open_group(&self) -> Option<NodeId> {
        self.open_group
    }

    /// Whether a group is under construction
    pub fn has_open_group(&self) -> bool {
        self.open_group.is_some()
    }

    /// The container new primitives go into: the open group if present, else the root
    pub fn active_container(&self) -> NodeId {
        self.open_group.unwrap_or(self.root)
    }

    /// Look up a node
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Children of a group, empty for primitives and unknown handles
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map(Node::children).unwrap_or(&[])
    }

    /// Total number of nodes, including the root and the open group
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The interface transform mirror
    pub fn interface(&self) -> &InterfaceTransform {
        &self.interface
    }

    /// The interface transform mirror, for UI controls to write into
    pub fn interface_mut(&mut self) -> &mut InterfaceTransform {
        &mut self.interface
    }

    /// Scene settings in use
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Adds a new primitive to the active container and makes it current
    ///
    /// The node keeps its identity transform relative to the container, so
    /// the interface mirror starts from zero translation and unit scale.
    pub fn add_primitive(&mut self, kind: PrimitiveKind) -> NodeId {
        let node = Node::primitive(kind, self.config.default_color, self.config.axis_scale);
        let id = self.nodes.insert(node);
        let container = self.active_container();
        self.attach(container, id);
        log::debug!("Added {} to {}", kind, self.describe(container));

        self.set_current(Some(id));
        id
    }

    /// Moves the selection to the next sibling of the current node, wrapping around
    ///
    /// Cycles through the container holding the current node. Does nothing
    /// when there is no current node or it has no siblings.
    pub fn select_next(&mut self) {
        let Some(current) = self.current else {
            log::debug!("select_next ignored: nothing selected");
            return;
        };

        if let Some(next) = self.next_sibling(current) {
            self.set_current(Some(next));
        }
    }

    /// Moves the current node into the open group, creating the group if needed
    ///
    /// Before the move the selection advances to the next sibling, or is
    /// cleared when the node was its container's only child. The node's
    /// translation is re-expressed relative to the group.
    pub fn add_selected_to_group(&mut self) {
        let Some(current) = self.current else {
            log::debug!("add_selected_to_group ignored: nothing selected");
            return;
        };
        if Some(current) == self.open_group {
            log::debug!("add_selected_to_group ignored: current node is the open group");
            return;
        }
        let Some(source) = self.nodes.get(current).and_then(Node::parent) else {
            log::warn!("add_selected_to_group ignored: current node is detached");
            return;
        };
        if Some(source) == self.open_group {
            log::debug!("add_selected_to_group ignored: node already in the open group");
            return;
        }

        let group = match self.open_group {
            Some(group) => group,
            None => {
                let group = self
                    .nodes
                    .insert(Node::group(self.config.default_color, self.config.axis_scale));
                self.open_group = Some(group);
                log::info!("Opened a new group");
                group
            }
        };

        if self.children(source).len() == 1 {
            self.set_current(None);
        } else {
            let next = self.next_sibling(current);
            self.set_current(next);
        }

        self.detach(current);
        self.attach(group, current);
        self.rebase_translation(current, group);
        log::debug!("Moved {} into the open group", self.describe(current));
    }

    /// Attaches the open group to the root and makes it current
    pub fn close_group(&mut self) {
        let Some(group) = self.open_group.take() else {
            log::debug!("close_group ignored: no open group");
            return;
        };

        self.attach(self.root, group);
        log::info!("Closed group with {} member(s)", self.children(group).len());
        self.set_current(Some(group));
    }

    /// Detaches the current group from the tree so it can be edited again
    ///
    /// Ignored when a group is already open, nothing is selected, or the
    /// current node is not a group.
    pub fn reopen_group(&mut self) {
        if self.open_group.is_some() {
            log::debug!("reopen_group ignored: a group is already open");
            return;
        }
        let Some(current) = self.current else {
            log::debug!("reopen_group ignored: nothing selected");
            return;
        };
        if !self.nodes.get(current).is_some_and(Node::is_group) {
            log::debug!("reopen_group ignored: current node is not a group");
            return;
        }

        if let Some(next) = self.next_sibling(current) {
            self.set_current(Some(next));
        }

        self.detach(current);
        self.open_group = Some(current);
        log::info!("Reopened group with {} member(s)", self.children(current).len());
    }

    /// Changes the current node
    ///
    /// The previous node (and, for a group, all its descendants) is
    /// deselected, the new one selected, and the interface mirror reloaded
    /// from the new node. Unknown handles and the root are rejected.
    pub fn set_current(&mut self, target: Option<NodeId>) {
        if let Some(id) = target {
            if id == self.root || !self.nodes.contains_key(id) {
                log::warn!("set_current rejected: {id:?} is not a selectable node");
                return;
            }
        }

        if let Some(previous) = self.current.take() {
            self.set_selected_recursive(previous, false);
        }

        self.current = target;
        match target.and_then(|id| self.nodes.get(id).map(|node| (id, node))) {
            Some((id, node)) => {
                self.interface.sync_from(node);
                self.set_selected_recursive(id, true);
                log::debug!("Current node is now {}", self.describe(id));
            }
            None => {
                self.interface.reset();
                log::debug!("Selection cleared");
            }
        }
    }

    /// Writes the interface mirror onto the current node
    ///
    /// Scale and translation are copied verbatim; the pending rotation delta
    /// is composed into the node's rotation matrix and reset to zero.
    pub fn apply_pending_transform(&mut self) {
        let Some(current) = self.current else {
            return;
        };
        let delta = self.interface.take_rotation_delta();
        let Some(node) = self.nodes.get_mut(current) else {
            return;
        };

        node.scale = self.interface.scale();
        node.translation = self.interface.translation();
        node.pending_rotation += delta;
        node.compose_rotation();
        log::trace!(
            "Applied transform: scale={:?} translation={:?} rotation_delta={:?}",
            node.scale,
            node.translation,
            delta
        );
    }

    /// World bounds of a node, including everything below it
    ///
    /// A group's box is the union of its own local box and its children's
    /// boxes, re-expressed through the group's transform.
    pub fn world_bounds(&self, id: NodeId) -> Option<AABB> {
        self.nodes.get(id).map(|node| self.compute_world_bounds(node))
    }

    fn compute_world_bounds(&self, node: &Node) -> AABB {
        let local = node
            .children()
            .iter()
            .filter_map(|child| self.nodes.get(*child))
            .fold(node.local_bounds, |acc, child| {
                acc.union(&self.compute_world_bounds(child))
            });
        local.transformed(&node.local_transform())
    }

    /// Bounds of the whole scene, open group included
    pub fn scene_bounds(&self) -> AABB {
        let root = self.compute_world_bounds(&self.nodes[self.root]);
        match self.open_group.and_then(|id| self.world_bounds(id)) {
            Some(open) => root.union(&open),
            None => root,
        }
    }

    /// Tab-indented listing of the scene, suitable for `Display`
    pub fn listing(&self) -> SceneListing<'_> {
        SceneListing { graph: self }
    }

    /// Writes the scene listing to `out`
    pub fn print_scene_graph<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self.listing())
    }

    /// Next sibling in insertion order, wrapping; `None` without siblings
    fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.nodes.get(id)?.parent?);
        if siblings.len() <= 1 {
            return None;
        }
        let index = siblings.iter().position(|child| *child == id)?;
        Some(siblings[(index + 1) % siblings.len()])
    }

    /// Appends `child` to `container`, leaving its stored transform untouched
    fn attach(&mut self, container: NodeId, child: NodeId) {
        let Some(children) = self.nodes.get_mut(container).and_then(Node::children_mut) else {
            log::warn!("Cannot attach to {container:?}: not a group");
            return;
        };
        children.push(child);

        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(container);
        }
    }

    /// Re-expresses a moved node's translation relative to its new container
    fn rebase_translation(&mut self, child: NodeId, container: NodeId) {
        let Some(offset) = self.nodes.get(container).map(|node| node.translation) else {
            return;
        };
        if let Some(node) = self.nodes.get_mut(child) {
            node.translation -= offset;
        }
    }

    /// Removes `child` from its container, leaving it unowned
    fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.nodes.get_mut(child).and_then(|node| node.parent.take()) else {
            return;
        };
        if let Some(children) = self.nodes.get_mut(parent).and_then(Node::children_mut) {
            children.retain(|id| *id != child);
        }
    }

    fn set_selected_recursive(&mut self, id: NodeId, selected: bool) {
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(next) {
                node.selected = selected;
                stack.extend_from_slice(node.children());
            }
        }
    }

    fn describe(&self, id: NodeId) -> String {
        match self.nodes.get(id) {
            Some(_) if id == self.root => "Root".to_string(),
            Some(node) => format!("{}({id:?})", node.kind().name()),
            None => format!("<missing {id:?}>"),
        }
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Pre-order, tab-indented dump of a [`SceneGraph`]
pub struct SceneListing<'a> {
    graph: &'a SceneGraph,
}

impl SceneListing<'_> {
    fn write_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, depth: usize) -> fmt::Result {
        let Some(node) = self.graph.node(id) else {
            return Ok(());
        };
        writeln!(f, "{}{}", "\t".repeat(depth), node.kind().name())?;
        for child in node.children() {
            self.write_node(f, *child, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for SceneListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Current Scene Graph")?;
        writeln!(f, "Root")?;
        for child in self.graph.children(self.graph.root()) {
            self.write_node(f, *child, 1)?;
        }

        if let Some(group) = self.graph.open_group() {
            writeln!(f, "Open Group")?;
            for child in self.graph.children(group) {
                self.write_node(f, *child, 1)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use approx::assert_relative_eq;

    #[test]
    fn test_scene_graph_creation() {
        let graph = SceneGraph::new();

        let root = graph.node(graph.root()).unwrap();
        assert!(root.is_group());
        assert!(root.parent().is_none());
        assert!(root.children().is_empty());
        assert_eq!(root.local_bounds, AABB::cube(1.0));
        assert_eq!(root.axis_scale, 1.0);
        assert!(!graph.has_current());
        assert!(!graph.has_open_group());
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_add_primitive_appends_and_selects() {
        let mut graph = SceneGraph::new();
        let mut previous = None;

        for (i, kind) in PrimitiveKind::ALL.into_iter().enumerate() {
            let id = graph.add_primitive(kind);
            assert_eq!(graph.children(graph.root()).len(), i + 1);
            assert_eq!(graph.current(), Some(id));
            assert!(graph.node(id).unwrap().is_selected());
            if let Some(prev) = previous {
                assert!(!graph.node(prev).map(Node::is_selected).unwrap());
            }
            previous = Some(id);
        }
    }

    #[test]
    fn test_add_primitive_resets_interface() {
        let mut graph = SceneGraph::new();
        let first = graph.add_primitive(PrimitiveKind::Cone);
        graph.interface_mut().set_translation(Vec3::new(1.0, 2.0, 3.0));
        graph.interface_mut().set_scale(Vec3::new(2.0, 2.0, 2.0));
        graph.apply_pending_transform();
        assert_eq!(graph.node(first).unwrap().translation, Vec3::new(1.0, 2.0, 3.0));

        graph.add_primitive(PrimitiveKind::Sphere);
        assert_eq!(graph.interface().translation(), Vec3::zeros());
        assert_eq!(graph.interface().scale(), Vec3::repeat(1.0));
        assert_eq!(graph.interface().rotation_delta(), Vec3::zeros());
    }

    #[test]
    fn test_select_next_cycles() {
        let mut graph = SceneGraph::new();
        let ids: Vec<_> = PrimitiveKind::ALL.into_iter().map(|k| graph.add_primitive(k)).collect();
        let start = graph.current();

        for _ in 0..ids.len() {
            graph.select_next();
        }
        assert_eq!(graph.current(), start);

        graph.select_next();
        assert_eq!(graph.current(), Some(ids[0]));
    }

    #[test]
    fn test_select_next_noop_cases() {
        let mut graph = SceneGraph::new();
        graph.select_next();
        assert!(!graph.has_current());

        let only = graph.add_primitive(PrimitiveKind::Torus);
        graph.select_next();
        assert_eq!(graph.current(), Some(only));
    }

    #[test]
    fn test_set_current_rejects_root_and_stale_handles() {
        let mut graph = SceneGraph::new();
        let cone = graph.add_primitive(PrimitiveKind::Cone);

        graph.set_current(Some(graph.root()));
        assert_eq!(graph.current(), Some(cone));

        graph.clear();
        graph.set_current(Some(cone));
        assert!(!graph.has_current());
        assert!(graph.node(cone).is_none());
    }

    #[test]
    fn test_apply_pending_transform() {
        let mut graph = SceneGraph::new();
        let id = graph.add_primitive(PrimitiveKind::Teapot);

        graph.interface_mut().set_scale(Vec3::new(2.0, 0.1, 9.0));
        graph.interface_mut().set_translation(Vec3::new(0.5, 0.0, -1.0));
        graph.interface_mut().set_rotation_delta(Vec3::new(0.0, 0.0, 90.0));
        graph.apply_pending_transform();

        let node = graph.node(id).unwrap();
        assert_eq!(node.scale, Vec3::new(2.0, 0.5, 4.0));
        assert_eq!(node.translation, Vec3::new(0.5, 0.0, -1.0));
        assert_eq!(node.pending_rotation, Vec3::zeros());
        assert_eq!(graph.interface().rotation_delta(), Vec3::zeros());

        let x = node.rotation.transform_vector(&Vec3::x());
        assert_relative_eq!(x, Vec3::y(), epsilon = 1e-5);

        // A second apply without a new delta must not rotate again.
        graph.apply_pending_transform();
        let x = graph.node(id).unwrap().rotation.transform_vector(&Vec3::x());
        assert_relative_eq!(x, Vec3::y(), epsilon = 1e-5);
    }

    #[test]
    fn test_apply_pending_transform_without_current() {
        let mut graph = SceneGraph::new();
        graph.interface_mut().set_translation(Vec3::new(1.0, 1.0, 1.0));
        graph.apply_pending_transform();
        assert_eq!(graph.node(graph.root()).unwrap().translation, Vec3::zeros());
    }

    #[test]
    fn test_listing_format() {
        let mut graph = SceneGraph::new();
        graph.add_primitive(PrimitiveKind::Cone);
        graph.add_primitive(PrimitiveKind::Sphere);
        graph.select_next();
        graph.add_selected_to_group();
        graph.close_group();

        let mut out = Vec::new();
        graph.print_scene_graph(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Current Scene Graph\nRoot\n\tSphere\n\tGroup\n\t\tCone\n"
        );
    }

    #[test]
    fn test_listing_shows_open_group() {
        let mut graph = SceneGraph::new();
        graph.add_primitive(PrimitiveKind::Torus);
        graph.add_selected_to_group();
        assert_eq!(
            graph.listing().to_string(),
            "Current Scene Graph\nRoot\nOpen Group\n\tTorus\n"
        );
    }
}
