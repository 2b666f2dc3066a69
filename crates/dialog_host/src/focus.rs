//! Focus introspection and control contracts.

use std::{cell::RefCell, rc::Rc};

/// Focus state observed for one region at query time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusSnapshot {
    /// Whether the active element is the region itself or one of its descendants.
    pub contains_focus: bool,
}

impl FocusSnapshot {
    /// Snapshot for a region that currently holds focus.
    pub const fn inside() -> Self {
        Self {
            contains_focus: true,
        }
    }

    /// Snapshot for a region that does not hold focus.
    pub const fn outside() -> Self {
        Self {
            contains_focus: false,
        }
    }
}

/// Host service for querying and moving keyboard focus by region id.
///
/// `snapshot` must be free of side effects so callers can query it on every render pass.
pub trait FocusService {
    /// Returns the focus state of the region identified by `region_id`.
    fn snapshot(&self, region_id: &str) -> FocusSnapshot;

    /// Moves keyboard focus onto the region identified by `region_id`.
    fn focus(&self, region_id: &str);
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op focus service for unsupported targets.
pub struct NoopFocusService;

impl FocusService for NoopFocusService {
    fn snapshot(&self, _region_id: &str) -> FocusSnapshot {
        FocusSnapshot::outside()
    }

    fn focus(&self, _region_id: &str) {}
}

#[derive(Debug, Default)]
struct MemoryFocusState {
    focused_region: Option<String>,
    accept_focus: bool,
    focus_requests: Vec<String>,
}

#[derive(Debug, Clone)]
/// In-memory focus service that tracks one focused region and records every focus request.
pub struct MemoryFocusService {
    inner: Rc<RefCell<MemoryFocusState>>,
}

impl Default for MemoryFocusService {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(MemoryFocusState {
                accept_focus: true,
                ..MemoryFocusState::default()
            })),
        }
    }
}

impl MemoryFocusService {
    /// Controls whether [`FocusService::focus`] actually moves focus into the region.
    pub fn set_accept_focus(&self, accept: bool) {
        self.inner.borrow_mut().accept_focus = accept;
    }

    /// Places focus inside `region_id`, as if the user had tabbed into it.
    pub fn move_focus_into(&self, region_id: &str) {
        self.inner.borrow_mut().focused_region = Some(region_id.to_string());
    }

    /// Moves focus somewhere outside every tracked region.
    pub fn move_focus_outside(&self) {
        self.inner.borrow_mut().focused_region = None;
    }

    /// Returns the currently focused region, if any.
    pub fn focused_region(&self) -> Option<String> {
        self.inner.borrow().focused_region.clone()
    }

    /// Returns every region id passed to [`FocusService::focus`], in call order.
    pub fn focus_requests(&self) -> Vec<String> {
        self.inner.borrow().focus_requests.clone()
    }
}

impl FocusService for MemoryFocusService {
    fn snapshot(&self, region_id: &str) -> FocusSnapshot {
        FocusSnapshot {
            contains_focus: self.inner.borrow().focused_region.as_deref() == Some(region_id),
        }
    }

    fn focus(&self, region_id: &str) {
        let mut inner = self.inner.borrow_mut();
        inner.focus_requests.push(region_id.to_string());
        if inner.accept_focus {
            inner.focused_region = Some(region_id.to_string());
        }
    }
}
