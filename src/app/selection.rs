use super::*;

impl App {
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Re-anchors the cursor on the previously selected repository after the
    /// list or filters change, clamping when that row is gone.
    pub(super) fn sync_selection(&mut self) {
        let (position, len) = {
            let rows = self.dashboard.filtered_rows();
            let position = self.selected_name.as_deref().and_then(|name| {
                rows.iter().position(|repo| repo.full_name == name)
            });
            (position, rows.len())
        };
        self.selected = match position {
            Some(position) => position,
            None => self.selected.min(len.saturating_sub(1)),
        };
        self.remember_selection();
    }

    pub(super) fn move_selection(&mut self, delta: isize) {
        let len = self.dashboard.filtered_rows().len();
        if len == 0 {
            self.selected = 0;
            self.selected_name = None;
            return;
        }
        let target = self.selected as isize + delta;
        self.selected = target.clamp(0, len as isize - 1) as usize;
        self.remember_selection();
    }

    pub(super) fn jump_to_top(&mut self) {
        self.selected = 0;
        self.remember_selection();
    }

    pub(super) fn jump_to_bottom(&mut self) {
        self.selected = self.dashboard.filtered_rows().len().saturating_sub(1);
        self.remember_selection();
    }

    fn remember_selection(&mut self) {
        self.selected_name = self.selected_repo().map(|repo| repo.full_name.clone());
    }
}
