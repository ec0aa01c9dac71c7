/*!
 * # Editing Core Module
 *
 * Everything that changes document text goes through here.
 *
 * ## Architecture Overview
 *
 * ### 1. Single Source of Truth: xi-rope Buffer
 * - A [`Document`] stores its text in one **`xi_rope::Rope`**
 * - Every edit compiles to a **Delta**; the bytes are never regenerated
 *
 * ### 2. Always-Fresh Range Index
 * - The [`RangeIndex`] is a full reparse of the latest text, rebuilt after
 *   every applied edit
 * - All decisions below read ranges from it, never from cached offsets
 *
 * ### 3. Suggestion Filter
 * - [`filter_edit`] rewrites a proposed local edit into markup-wrapped edits
 *   when the [`SuggestionSession`] is enabled
 * - Programmatic edits (accept/reject, comments, merges) always pass through
 *
 * ### 4. Resolution and Annotation
 * - [`resolve`] turns one range back into plain text; [`resolve_all`] does
 *   the whole document
 * - [`add_comment`] and [`reply`] produce comment markup directly
 *
 * ## Module Structure
 *
 * - **`change`**: `TextChange`, `EditProposal` and change-list helpers
 * - **`index`**: `RangeIndex`
 * - **`suggest`**: suggestion-mode filter
 * - **`resolve`**: accept/reject
 * - **`annotate`**: comments and replies
 * - **`document`**: `Document` glue over the rope
 * - **`patch`**: edit result metadata
 * - **`error`**: `EditError`
 */

pub mod annotate;
pub mod change;
pub mod document;
pub mod error;
pub mod index;
pub mod patch;
pub mod resolve;
pub mod suggest;

pub use annotate::{add_comment, reply};
pub use change::{EditOrigin, EditProposal, TextChange};
pub use document::{Document, now_millis};
pub use error::EditError;
pub use index::RangeIndex;
pub use patch::Patch;
pub use resolve::{Resolution, replacement_for, resolve, resolve_all, resolve_thread};
pub use suggest::{FilteredEdit, SuggestAction, SuggestionSession, filter_edit};
