// Structures - typed wrappers for common widgets
//
// Every structure wraps one `Element` and derefs to it, so the element
// accessors (`exists`, `attribute`, `wait_until_present`, ...) are always
// available. What a structure can *do* comes from the capability traits it
// implements.

mod button;
mod dropdown;
mod form;
mod input;
mod list;
mod navigation;
mod search;
mod table;

pub use button::{Button, Div, Image, Link, Text};
pub use dropdown::{Dropdown, DropdownForm, DropdownMenu};
pub use form::{FieldValue, Form, Modal};
pub use input::{InputCheckbox, InputRadio, InputText, Select};
pub use list::{List, Row};
pub use navigation::TabNavigation;
pub use search::{Search, SearchBox};
pub use table::{SortOrder, SortState, Table};

/// Newtype over `Element` with `From<Element>`, `AsElement` and `Deref`.
macro_rules! wrapper {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name(crate::element::Element);

        impl From<crate::element::Element> for $name {
            fn from(element: crate::element::Element) -> Self {
                Self(element)
            }
        }

        impl crate::capabilities::AsElement for $name {
            fn element(&self) -> &crate::element::Element {
                &self.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = crate::element::Element;

            fn deref(&self) -> &crate::element::Element {
                &self.0
            }
        }
    };
}

pub(crate) use wrapper;
