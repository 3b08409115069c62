//! UI Components
//!
//! Leptos components of the issue board.

mod board_column;
mod delete_confirm_button;
mod edit_issue_modal;
mod issue_board;
mod issue_card;
mod new_issue_form;
mod toast_stack;

pub use board_column::BoardColumn;
pub use delete_confirm_button::DeleteConfirmButton;
pub use edit_issue_modal::EditIssueModal;
pub use issue_board::IssueBoard;
pub use issue_card::IssueCard;
pub use new_issue_form::NewIssueForm;
pub use toast_stack::ToastStack;
