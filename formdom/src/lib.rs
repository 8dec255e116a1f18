pub mod element;
pub mod event;
pub mod selector;

pub use element::{
    find_element, find_element_mut, query, query_all, query_mut, Content, Element, ElementKind,
    InputType, SelectOption,
};
pub use event::{Event, EventKind};
pub use selector::{Selector, SelectorError};
