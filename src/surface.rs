//! Rendered surface the component drives
//!
//! The component never touches markup directly. It resolves element handles
//! once through stable selectors and afterwards only reads input values,
//! toggles style classes and moves focus through the `Surface` trait.
//! `MemorySurface` is the in-process implementation used by the terminal
//! host and the tests.

use std::collections::HashSet;

use crate::error::InputError;
use crate::field::AnswerField;

/// Stable selectors exposed by the rendered markup
pub mod selectors {
    /// Root that becomes active once the question has animated in
    pub const VISIBLE: &str = "js-player-input-visible";
    /// Each per-player panel, in rendered order
    pub const PANEL: &str = "js-player-input-container";
    pub const PANEL_ONE: &str = "js-player-one-container";
    pub const PANEL_TWO: &str = "js-player-two-container";
    pub const INPUT_ONE: &str = "js-player-input-team-one";
    pub const INPUT_TWO: &str = "js-player-input-team-two";
    /// Every input control
    pub const INPUT: &str = "js-player-input";
}

/// Opaque handle to a rendered element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub usize);

/// Style flags applied to panels and controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    Active,
    Hidden,
    Submitted,
}

impl Class {
    pub fn css_name(&self) -> &'static str {
        match self {
            Class::Active => "is-active",
            Class::Hidden => "is-hidden",
            Class::Submitted => "is-submitted",
        }
    }
}

/// One of the two players in a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// 1-based position of the player's panel in rendered order
    pub fn index(&self) -> usize {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

/// Element query and manipulation seam
pub trait Surface {
    /// All elements carrying `selector`, in document order
    fn query(&self, selector: &str) -> Vec<ElementId>;

    /// First descendant of `parent` carrying `selector`
    fn query_within(&self, parent: ElementId, selector: &str) -> Option<ElementId>;

    /// Current text of an input control (empty for non-inputs)
    fn value(&self, element: ElementId) -> String;

    fn add_class(&mut self, element: ElementId, class: Class);

    fn remove_class(&mut self, element: ElementId, class: Class);

    fn focus(&mut self, element: ElementId);
}

/// Element handles resolved once at initialization
#[derive(Debug, Clone)]
pub struct Handles {
    pub visible: ElementId,
    /// Per-player panels in rendered order
    pub panels: Vec<ElementId>,
    pub panel_one: ElementId,
    pub panel_two: ElementId,
    pub input_one: ElementId,
    pub input_two: ElementId,
    pub inputs: Vec<ElementId>,
}

impl Handles {
    /// Resolve every handle the component needs
    pub fn resolve<S: Surface + ?Sized>(surface: &S) -> Result<Self, InputError> {
        let first = |selector: &'static str| {
            surface
                .query(selector)
                .into_iter()
                .next()
                .ok_or(InputError::MissingElement(selector))
        };

        let panels = surface.query(selectors::PANEL);
        if panels.len() != 2 {
            return Err(InputError::PanelCount {
                expected: 2,
                found: panels.len(),
            });
        }

        Ok(Self {
            visible: first(selectors::VISIBLE)?,
            panels,
            panel_one: first(selectors::PANEL_ONE)?,
            panel_two: first(selectors::PANEL_TWO)?,
            input_one: first(selectors::INPUT_ONE)?,
            input_two: first(selectors::INPUT_TWO)?,
            inputs: surface.query(selectors::INPUT),
        })
    }

    pub fn panel(&self, player: Player) -> ElementId {
        match player {
            Player::One => self.panel_one,
            Player::Two => self.panel_two,
        }
    }

    pub fn input(&self, player: Player) -> ElementId {
        match player {
            Player::One => self.input_one,
            Player::Two => self.input_two,
        }
    }
}

#[derive(Debug)]
struct Node {
    parent: Option<ElementId>,
    selectors: Vec<&'static str>,
    classes: HashSet<Class>,
    field: Option<AnswerField>,
}

/// In-memory element tree
#[derive(Debug, Default)]
pub struct MemorySurface {
    nodes: Vec<Node>,
    focused: Option<ElementId>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard two-player markup: visible root, two panels, two inputs
    pub fn player_input() -> Self {
        let mut surface = Self::new();
        let root = surface.insert(None, &[selectors::VISIBLE]);

        let one = surface.insert(Some(root), &[selectors::PANEL_ONE, selectors::PANEL]);
        surface.insert_input(one, &[selectors::INPUT_ONE, selectors::INPUT]);

        let two = surface.insert(Some(root), &[selectors::PANEL_TWO, selectors::PANEL]);
        surface.insert_input(two, &[selectors::INPUT_TWO, selectors::INPUT]);

        surface
    }

    /// Append a plain element
    pub fn insert(&mut self, parent: Option<ElementId>, selectors: &[&'static str]) -> ElementId {
        self.push(parent, selectors, None)
    }

    /// Append an input control backed by an `AnswerField`
    pub fn insert_input(&mut self, parent: ElementId, selectors: &[&'static str]) -> ElementId {
        self.push(Some(parent), selectors, Some(AnswerField::new()))
    }

    fn push(
        &mut self,
        parent: Option<ElementId>,
        selectors: &[&'static str],
        field: Option<AnswerField>,
    ) -> ElementId {
        let id = ElementId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            selectors: selectors.to_vec(),
            classes: HashSet::new(),
            field,
        });
        id
    }

    pub fn has_class(&self, element: ElementId, class: Class) -> bool {
        self.nodes
            .get(element.0)
            .is_some_and(|n| n.classes.contains(&class))
    }

    /// CSS class names on an element, sorted
    pub fn class_names(&self, element: ElementId) -> Vec<&'static str> {
        let mut names: Vec<_> = self
            .nodes
            .get(element.0)
            .map(|n| n.classes.iter().map(Class::css_name).collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    pub fn field(&self, element: ElementId) -> Option<&AnswerField> {
        self.nodes.get(element.0).and_then(|n| n.field.as_ref())
    }

    pub fn field_mut(&mut self, element: ElementId) -> Option<&mut AnswerField> {
        self.nodes.get_mut(element.0).and_then(|n| n.field.as_mut())
    }

    /// Overwrite an input's text
    pub fn set_value(&mut self, element: ElementId, value: &str) {
        if let Some(field) = self.field_mut(element) {
            field.set_value(value);
        }
    }

    fn is_descendant(&self, element: ElementId, ancestor: ElementId) -> bool {
        let mut cursor = self.nodes.get(element.0).and_then(|n| n.parent);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = self.nodes.get(id.0).and_then(|n| n.parent);
        }
        false
    }
}

impl Surface for MemorySurface {
    fn query(&self, selector: &str) -> Vec<ElementId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.selectors.contains(&selector))
            .map(|(i, _)| ElementId(i))
            .collect()
    }

    fn query_within(&self, parent: ElementId, selector: &str) -> Option<ElementId> {
        self.query(selector)
            .into_iter()
            .find(|id| self.is_descendant(*id, parent))
    }

    fn value(&self, element: ElementId) -> String {
        self.field(element)
            .map(|f| f.value().to_string())
            .unwrap_or_default()
    }

    fn add_class(&mut self, element: ElementId, class: Class) {
        if let Some(node) = self.nodes.get_mut(element.0) {
            node.classes.insert(class);
        }
    }

    fn remove_class(&mut self, element: ElementId, class: Class) {
        if let Some(node) = self.nodes.get_mut(element.0) {
            node.classes.remove(&class);
        }
    }

    fn focus(&mut self, element: ElementId) {
        self.focused = Some(element);
    }
}
