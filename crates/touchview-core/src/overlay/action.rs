//! Known context actions and their captions.

/// Engine context-action identifier.
pub type ActionId = i32;

/// Context actions with a known caption.
///
/// Discriminants are the engine's action ids. Id 0 is reserved and ids past
/// [`ContextAction::Flip`] are unknown to this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextAction {
    SelectAll = 1,
    Reselect = 2,
    Draw = 3,
    Cancel = 4,
    Delete = 5,
    Clone = 6,
    FixedLength = 7,
    FreeLength = 8,
    Lock = 9,
    Unlock = 10,
    Edit = 11,
    Back = 12,
    CloseShape = 13,
    OpenShape = 14,
    AddPoint = 15,
    DeletePoint = 16,
    Group = 17,
    Ungroup = 18,
    Flip = 19,
}

impl ContextAction {
    /// All known actions in id order.
    pub const ALL: [ContextAction; 19] = [
        ContextAction::SelectAll,
        ContextAction::Reselect,
        ContextAction::Draw,
        ContextAction::Cancel,
        ContextAction::Delete,
        ContextAction::Clone,
        ContextAction::FixedLength,
        ContextAction::FreeLength,
        ContextAction::Lock,
        ContextAction::Unlock,
        ContextAction::Edit,
        ContextAction::Back,
        ContextAction::CloseShape,
        ContextAction::OpenShape,
        ContextAction::AddPoint,
        ContextAction::DeletePoint,
        ContextAction::Group,
        ContextAction::Ungroup,
        ContextAction::Flip,
    ];

    /// Look up a known action by engine id.
    pub fn from_id(id: ActionId) -> Option<Self> {
        let index = usize::try_from(id).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    /// The engine id of this action.
    pub fn id(self) -> ActionId {
        self as ActionId
    }

    /// Caption shown as tooltip or button text.
    pub fn caption(self) -> &'static str {
        match self {
            ContextAction::SelectAll => "Select All",
            ContextAction::Reselect => "Reselect",
            ContextAction::Draw => "Draw",
            ContextAction::Cancel => "Cancel",
            ContextAction::Delete => "Delete",
            ContextAction::Clone => "Clone",
            ContextAction::FixedLength => "Fixed Length",
            ContextAction::FreeLength => "Free Length",
            ContextAction::Lock => "Lock",
            ContextAction::Unlock => "Unlock",
            ContextAction::Edit => "Edit",
            ContextAction::Back => "Back",
            ContextAction::CloseShape => "Close",
            ContextAction::OpenShape => "Open",
            ContextAction::AddPoint => "Add Point",
            ContextAction::DeletePoint => "Delete Point",
            ContextAction::Group => "Group",
            ContextAction::Ungroup => "Ungroup",
            ContextAction::Flip => "Flip",
        }
    }

    /// Caption for an engine id, if the id is known.
    pub fn caption_for(id: ActionId) -> Option<&'static str> {
        Self::from_id(id).map(Self::caption)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_match_table_order() {
        for (index, action) in ContextAction::ALL.iter().enumerate() {
            assert_eq!(action.id(), index as ActionId + 1);
            assert_eq!(ContextAction::from_id(action.id()), Some(*action));
        }
    }

    #[test]
    fn test_unknown_ids() {
        assert_eq!(ContextAction::from_id(0), None);
        assert_eq!(ContextAction::from_id(-3), None);
        assert_eq!(ContextAction::from_id(20), None);
        assert_eq!(ContextAction::caption_for(42), None);
    }

    #[test]
    fn test_captions() {
        assert_eq!(ContextAction::caption_for(5), Some("Delete"));
        assert_eq!(ContextAction::Flip.caption(), "Flip");
    }
}
