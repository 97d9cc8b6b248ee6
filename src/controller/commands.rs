use crate::model::PlotAttrs;

/// Single-key viewer commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    CenterView,
    Coarser,
    Finer,
    ToggleLocate,
    TogglePick,
    /// XOR an attribute on the active primitive
    ToggleAttr(PlotAttrs),
    Home,
    NextActive,
    SelectPicked,
}

impl KeyCommand {
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            '*' => Some(KeyCommand::CenterView),
            '<' => Some(KeyCommand::Coarser),
            '>' => Some(KeyCommand::Finer),
            'L' => Some(KeyCommand::ToggleLocate),
            'P' => Some(KeyCommand::TogglePick),
            'c' => Some(KeyCommand::ToggleAttr(PlotAttrs::SHADING)),
            'h' => Some(KeyCommand::Home),
            'l' => Some(KeyCommand::ToggleAttr(PlotAttrs::LINES)),
            'n' => Some(KeyCommand::NextActive),
            'o' => Some(KeyCommand::ToggleAttr(PlotAttrs::ORIENTATION)),
            'p' => Some(KeyCommand::ToggleAttr(PlotAttrs::POINTS)),
            'r' => Some(KeyCommand::ToggleAttr(PlotAttrs::ON)),
            's' => Some(KeyCommand::SelectPicked),
            't' => Some(KeyCommand::ToggleAttr(PlotAttrs::TRANSPARENT)),
            _ => None,
        }
    }

    /// Message sent to the tessellation server, if any
    pub fn server_request(&self) -> Option<&'static str> {
        match self {
            KeyCommand::Coarser => Some("coarser"),
            KeyCommand::Finer => Some("finer"),
            _ => None,
        }
    }
}
