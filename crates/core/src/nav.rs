use dimli_protocol::HitTarget;

/// Buttons on the right side of the navigation bar, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Search,
    Discord,
    Upload,
    Notifications,
    Cart,
}

impl NavAction {
    pub const ALL: [NavAction; 5] = [
        NavAction::Search,
        NavAction::Discord,
        NavAction::Upload,
        NavAction::Notifications,
        NavAction::Cart,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NavAction::Search => "Search",
            NavAction::Discord => "Discord",
            NavAction::Upload => "Upload",
            NavAction::Notifications => "Notifications",
            NavAction::Cart => "Shopping cart",
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Open/closed state of the profile dropdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileMenu {
    open: bool,
}

impl ProfileMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Profile button clicked.
    pub fn toggle(&mut self) {
        self.open = !self.open;
        tracing::debug!(open = self.open, "profile menu toggled");
    }

    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    /// A pointer went down somewhere on the page. Pressing outside the
    /// button and the dropdown closes the menu. Returns whether it closed.
    pub fn pointer_down(&mut self, hit: Option<HitTarget>) -> bool {
        if is_profile_region(hit) {
            return false;
        }
        self.close()
    }
}

/// Whether a hit belongs to the profile button or its dropdown.
pub fn is_profile_region(hit: Option<HitTarget>) -> bool {
    matches!(
        hit,
        Some(HitTarget::ProfileButton | HitTarget::ProfileMenu | HitTarget::MenuItem(_))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_toggles() {
        let mut menu = ProfileMenu::new();
        menu.toggle();
        assert!(menu.is_open());
        menu.toggle();
        assert!(!menu.is_open());
    }

    #[test]
    fn outside_press_closes() {
        let mut menu = ProfileMenu::new();
        menu.toggle();
        assert!(menu.pointer_down(None));
        assert!(!menu.is_open());

        menu.toggle();
        assert!(menu.pointer_down(Some(HitTarget::Icon(0))));
        assert!(!menu.is_open());
    }

    #[test]
    fn press_inside_keeps_open() {
        let mut menu = ProfileMenu::new();
        menu.toggle();
        assert!(!menu.pointer_down(Some(HitTarget::ProfileMenu)));
        assert!(!menu.pointer_down(Some(HitTarget::MenuItem(2))));
        assert!(menu.is_open());
    }

    #[test]
    fn outside_press_on_closed_menu_is_noop() {
        let mut menu = ProfileMenu::new();
        assert!(!menu.pointer_down(None));
    }

    #[test]
    fn actions_by_index() {
        assert_eq!(NavAction::from_index(1), Some(NavAction::Discord));
        assert_eq!(NavAction::from_index(5), None);
    }
}
