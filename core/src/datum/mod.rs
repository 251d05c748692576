//! Runtime representation of Logo data.
//!
//! Every value manipulated by the interpreter is a [Datum]: a handle to a reference-counted,
//! heap-allocated datum block. A datum block is made of a [header][DatumHeader] (tag, flags and
//! reference count) directly followed by a body whose type is determined by the tag:
//!
//! ```text
//! -------------+------+
//! | DatumHeader | body |
//! -------------+------+
//! ```
//!
//! Cloning a [Datum] increments the reference count of the block and dropping it decrements it.
//! A block is freed when its count drops to zero, unless it has been allocated as permanent: the
//! `nothing` sentinel and the `true`/`false` words live for as long as the thread does.
//!
//! The reference count is not atomic. [Datum] is neither `Send` nor `Sync`, and the permanent
//! singletons are allocated once per thread.
//!
//! Bodies use interior mutability: lists are deliberately shared, and mutating the cells of a
//! list is visible through every list sharing those cells.

use std::{
    cell::Cell,
    fmt,
    mem::ManuallyDrop,
    ptr::NonNull,
    thread::LocalKey,
};

use crate::{
    config::PrintOptions,
    equality::EqualityContext,
    error::{DatumError, OrViolation, Result, TagMismatchError},
    iter::Cursor,
    metrics::increment,
    print::Printer,
};

mod array;
mod ast;
mod list;
mod opaque;
mod word;

pub use array::ArrayBody;
pub use ast::AstNodeBody;
pub use list::{CellBody, ListBody};
pub use opaque::{ErrorBody, ProcedureBody};
pub use word::{format_number, Freshness, WordBody};

/// The variant of a datum. The tag of a datum never changes after construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DatumTag {
    Nothing,
    Word,
    List,
    ListCell,
    Array,
    AstNode,
    Procedure,
    Error,
}

impl DatumTag {
    /// The name of the variant, as shown to the user.
    pub fn name(self) -> &'static str {
        match self {
            DatumTag::Nothing => "nothing",
            DatumTag::Word => "Word",
            DatumTag::List => "List",
            DatumTag::ListCell => "ListNode",
            DatumTag::Array => "Array",
            DatumTag::AstNode => "ASTNode",
            DatumTag::Procedure => "Procedure",
            DatumTag::Error => "Error",
        }
    }
}

impl fmt::Display for DatumTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

mod private {
    pub trait Sealed {}
}

/// Marker trait for the data that can be stored in a datum block after the header.
pub trait DatumBody: private::Sealed + 'static {
    const TAG: DatumTag;
}

macro_rules! datum_body {
    ( $( $body:ty => $tag:ident ),+ $(,)? ) => {
        $(
            impl private::Sealed for $body {}

            impl DatumBody for $body {
                const TAG: DatumTag = DatumTag::$tag;
            }
        )+
    };
}

/// The body of the `nothing` sentinel. It can't be built outside of this module: the only
/// `nothing` datum is the per-thread singleton returned by [Datum::nothing].
#[derive(Debug)]
pub struct NothingBody {
    _private: (),
}

datum_body! {
    NothingBody => Nothing,
    WordBody => Word,
    ListBody => List,
    CellBody => ListCell,
    ArrayBody => Array,
    AstNodeBody => AstNode,
    ProcedureBody => Procedure,
    ErrorBody => Error,
}

/// The header of a datum block.
#[repr(C)]
#[derive(Debug)]
struct DatumHeader {
    /// The tag determining the type of the body following the header.
    tag: DatumTag,
    /// Permanent blocks are never freed, whatever their reference count.
    destroyable: bool,
    mutable: Cell<bool>,
    ref_count: Cell<u64>,
}

impl DatumHeader {
    fn new(tag: DatumTag, destroyable: bool) -> Self {
        DatumHeader {
            tag,
            destroyable,
            mutable: Cell::new(true),
            ref_count: Cell::new(1),
        }
    }
}

/// A datum block. `#[repr(C)]` guarantees that the header sits at the start of the block, so
/// that a pointer to the block can be used as a pointer to the header.
#[repr(C)]
struct DatumBlock<T> {
    header: DatumHeader,
    body: T,
}

/// Live and peak counts of allocated datum blocks on the current thread.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NodeStats {
    pub live: usize,
    pub peak: usize,
}

thread_local! {
    static NODE_STATS: Cell<NodeStats> = const { Cell::new(NodeStats { live: 0, peak: 0 }) };

    static NOTHING: Cell<Option<NonNull<DatumHeader>>> = const { Cell::new(None) };
    static TRUE_WORD: Cell<Option<NonNull<DatumHeader>>> = const { Cell::new(None) };
    static FALSE_WORD: Cell<Option<NonNull<DatumHeader>>> = const { Cell::new(None) };
}

/// Returns the node statistics of the current thread, and resets the peak count to the live
/// count.
pub fn node_stats() -> NodeStats {
    NODE_STATS.with(|cell| {
        let stats = cell.get();
        cell.set(NodeStats {
            live: stats.live,
            peak: stats.live,
        });
        stats
    })
}

/// Same as [node_stats], but returns the statistics as a list of two numeric words `[live peak]`.
pub fn nodes() -> Datum {
    let NodeStats { live, peak } = node_stats();
    Datum::list_from([
        Datum::from_number(live as f64),
        Datum::from_number(peak as f64),
    ])
}

fn node_created() {
    NODE_STATS.with(|cell| {
        let NodeStats { live, peak } = cell.get();
        let live = live + 1;
        cell.set(NodeStats {
            live,
            peak: peak.max(live),
        });
    });
}

fn node_freed() {
    NODE_STATS.with(|cell| {
        let stats = cell.get();
        cell.set(NodeStats {
            live: stats.live.saturating_sub(1),
            ..stats
        });
    });
}

/// A handle to a reference-counted datum block.
pub struct Datum(NonNull<DatumHeader>);

/// A reference to the content of a datum, for exhaustive matching over the variants.
#[derive(Clone, Copy, Debug)]
pub enum DatumContentRef<'a> {
    Nothing,
    Word(&'a WordBody),
    List(&'a ListBody),
    ListCell(&'a CellBody),
    Array(&'a ArrayBody),
    AstNode(&'a AstNodeBody),
    Procedure(&'a ProcedureBody),
    Error(&'a ErrorBody),
}

impl Datum {
    /// Allocates a new datum block holding `body`, with a reference count of one.
    fn encode<T: DatumBody>(body: T, destroyable: bool) -> Self {
        let block = Box::new(DatumBlock {
            header: DatumHeader::new(T::TAG, destroyable),
            body,
        });

        node_created();
        increment!("datum::allocated");

        Datum(NonNull::from(Box::leak(block)).cast())
    }

    /// Returns a handle to the permanent block stored in `slot`, allocating it with `init` the
    /// first time.
    fn permanent(
        slot: &'static LocalKey<Cell<Option<NonNull<DatumHeader>>>>,
        init: impl FnOnce() -> Datum,
    ) -> Self {
        slot.with(|cell| {
            let ptr = cell.get().unwrap_or_else(|| {
                // The slot owns the reference of the freshly allocated block for the lifetime
                // of the thread, so we must not run the destructor of the handle.
                let ptr = ManuallyDrop::new(init()).0;
                cell.set(Some(ptr));
                ptr
            });

            // Borrow the slot's reference without giving it up, and clone it to get our own.
            let borrowed = ManuallyDrop::new(Datum(ptr));
            Datum::clone(&borrowed)
        })
    }

    /// Wraps a new body in a datum.
    pub fn new<T: DatumBody>(body: T) -> Self {
        Self::encode(body, true)
    }

    /// The `nothing` sentinel, also returned by [Datum::default].
    pub fn nothing() -> Self {
        Self::permanent(&NOTHING, || {
            Self::encode(NothingBody { _private: () }, false)
        })
    }

    /// The permanent `true` or `false` word.
    pub fn from_bool(value: bool) -> Self {
        if value {
            Self::permanent(&TRUE_WORD, || {
                Self::encode(WordBody::from_text("true"), false)
            })
        } else {
            Self::permanent(&FALSE_WORD, || {
                Self::encode(WordBody::from_text("false"), false)
            })
        }
    }

    /// A word holding `text` as its raw form.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(WordBody::from_text(text))
    }

    /// A word holding `text` which must never be reinterpreted by the reader, such as the content
    /// of a vertical-bar quoted token.
    pub fn special_word(text: impl Into<String>) -> Self {
        Self::new(WordBody::special(text))
    }

    /// A word holding `number` as its authoritative form.
    pub fn from_number(number: f64) -> Self {
        Self::new(WordBody::from_number(number))
    }

    pub fn empty_list() -> Self {
        Self::new(ListBody::new())
    }

    /// A fresh list holding `items` in order.
    pub fn list_from(items: impl IntoIterator<Item = Datum>) -> Self {
        Self::new(ListBody::from_items(items))
    }

    /// An array of `size` slots, each holding a fresh empty list, whose first slot has index
    /// `origin`.
    pub fn new_array(origin: i64, size: usize) -> Self {
        Self::new(ArrayBody::new(origin, size))
    }

    /// An array holding `items` in order, whose first slot has index `origin`.
    pub fn array_from(origin: i64, items: impl IntoIterator<Item = Datum>) -> Self {
        Self::new(ArrayBody::from_items(origin, items))
    }

    pub fn new_ast_node(name: Datum) -> Self {
        Self::new(AstNodeBody::new(name))
    }

    pub fn new_error(code: i32, text: Datum, tag: Datum) -> Self {
        Self::new(ErrorBody::new(code, text, tag))
    }

    fn header(&self) -> &DatumHeader {
        // Safety: `self.0` points to the header of a live block, since we hold a reference to it.
        unsafe { self.0.as_ref() }
    }

    pub fn tag(&self) -> DatumTag {
        self.header().tag
    }

    /// The current reference count of the underlying block.
    pub fn ref_count(&self) -> u64 {
        self.header().ref_count.get()
    }

    /// Whether the underlying block is freed once its last handle is dropped.
    pub fn is_destroyable(&self) -> bool {
        self.header().destroyable
    }

    pub fn is_mutable(&self) -> bool {
        self.header().mutable.get()
    }

    /// Flags the datum as immutable. The flag is advisory: it's up to the evaluator to refuse
    /// mutating primitives on immutable data, such as the lists making up a procedure body.
    pub fn set_immutable(&self) {
        self.header().mutable.set(false);
    }

    /// An opaque identifier of the underlying block, stable for as long as the block is alive.
    pub(crate) fn id(&self) -> usize {
        self.0.as_ptr() as usize
    }

    /// Checks for physical equality of two datums, that is whether they point to the same block.
    /// This is the semantics of Logo's `.EQ`.
    pub fn phys_eq(&self, other: &Datum) -> bool {
        self.0 == other.0
    }

    /// Alias of [Self::phys_eq].
    pub fn is_dot_equal(&self, other: &Datum) -> bool {
        self.phys_eq(other)
    }

    /// Structural equality, with words compared case-insensitively if `ignore_case` is set. This
    /// is the semantics of Logo's `EQUALP`. Comparing self-referential structures terminates.
    pub fn is_equal(&self, other: &Datum, ignore_case: bool) -> bool {
        EqualityContext::new().datums_equal(self, other, ignore_case)
    }

    pub fn is_nothing(&self) -> bool {
        self.tag() == DatumTag::Nothing
    }

    pub fn is_word(&self) -> bool {
        self.tag() == DatumTag::Word
    }

    pub fn is_list(&self) -> bool {
        self.tag() == DatumTag::List
    }

    pub fn is_array(&self) -> bool {
        self.tag() == DatumTag::Array
    }

    pub fn is_ast_node(&self) -> bool {
        self.tag() == DatumTag::AstNode
    }

    pub fn is_procedure(&self) -> bool {
        self.tag() == DatumTag::Procedure
    }

    pub fn is_error(&self) -> bool {
        self.tag() == DatumTag::Error
    }

    /// Tries to decode the body of this datum as a `T`. Fails if the tag of the datum isn't
    /// `T::TAG`.
    pub fn try_decode<T: DatumBody>(&self) -> Result<&T, TagMismatchError> {
        let found = self.tag();

        if found == T::TAG {
            // Safety: the tag has been checked, so the block has been encoded from a `T`.
            Ok(unsafe { self.decode_unchecked() })
        } else {
            Err(TagMismatchError {
                expected: T::TAG,
                found,
            })
        }
    }

    /// Panicking variant of [Self::try_decode].
    #[track_caller]
    pub fn decode<T: DatumBody>(&self) -> &T {
        self.try_decode().or_violation()
    }

    /// Decodes the body of this datum without checking the tag.
    ///
    /// # Safety
    ///
    /// The block must have been encoded from a `T`, that is `self.tag() == T::TAG`.
    unsafe fn decode_unchecked<T: DatumBody>(&self) -> &T {
        &self.0.cast::<DatumBlock<T>>().as_ref().body
    }

    pub fn as_word(&self) -> Option<&WordBody> {
        self.try_decode().ok()
    }

    pub fn as_list(&self) -> Option<&ListBody> {
        self.try_decode().ok()
    }

    pub fn as_cell(&self) -> Option<&CellBody> {
        self.try_decode().ok()
    }

    pub fn as_array(&self) -> Option<&ArrayBody> {
        self.try_decode().ok()
    }

    pub fn as_ast_node(&self) -> Option<&AstNodeBody> {
        self.try_decode().ok()
    }

    pub fn as_procedure(&self) -> Option<&ProcedureBody> {
        self.try_decode().ok()
    }

    pub fn as_error(&self) -> Option<&ErrorBody> {
        self.try_decode().ok()
    }

    /// Panicking variant of [Self::as_word].
    #[track_caller]
    pub fn word(&self) -> &WordBody {
        self.decode()
    }

    /// Panicking variant of [Self::as_list].
    #[track_caller]
    pub fn list(&self) -> &ListBody {
        self.decode()
    }

    /// Panicking variant of [Self::as_cell].
    #[track_caller]
    pub fn cell(&self) -> &CellBody {
        self.decode()
    }

    /// Panicking variant of [Self::as_array].
    #[track_caller]
    pub fn array(&self) -> &ArrayBody {
        self.decode()
    }

    /// Panicking variant of [Self::as_ast_node].
    #[track_caller]
    pub fn ast_node(&self) -> &AstNodeBody {
        self.decode()
    }

    /// Panicking variant of [Self::as_procedure].
    #[track_caller]
    pub fn procedure(&self) -> &ProcedureBody {
        self.decode()
    }

    /// Panicking variant of [Self::as_error].
    #[track_caller]
    pub fn error(&self) -> &ErrorBody {
        self.decode()
    }

    /// Returns a reference to the content of this datum.
    pub fn content_ref(&self) -> DatumContentRef<'_> {
        // Safety: each arm decodes the body with the type matching the tag.
        unsafe {
            match self.tag() {
                DatumTag::Nothing => DatumContentRef::Nothing,
                DatumTag::Word => DatumContentRef::Word(self.decode_unchecked()),
                DatumTag::List => DatumContentRef::List(self.decode_unchecked()),
                DatumTag::ListCell => DatumContentRef::ListCell(self.decode_unchecked()),
                DatumTag::Array => DatumContentRef::Array(self.decode_unchecked()),
                DatumTag::AstNode => DatumContentRef::AstNode(self.decode_unchecked()),
                DatumTag::Procedure => DatumContentRef::Procedure(self.decode_unchecked()),
                DatumTag::Error => DatumContentRef::Error(self.decode_unchecked()),
            }
        }
    }

    fn unsupported(&self, op: &'static str) -> DatumError {
        DatumError::Unsupported {
            op,
            tag: self.tag(),
        }
    }

    /// A cursor over the elements of a list or an array, or the characters of a word.
    pub fn try_cursor(&self) -> Result<Cursor> {
        match self.content_ref() {
            DatumContentRef::Word(_) => Ok(Cursor::word(self.clone())),
            DatumContentRef::List(list) => Ok(Cursor::list(list)),
            DatumContentRef::Array(_) => Ok(Cursor::array(self.clone())),
            _ => Err(self.unsupported("cursor")),
        }
    }

    /// Panicking variant of [Self::try_cursor].
    #[track_caller]
    pub fn cursor(&self) -> Cursor {
        self.try_cursor().or_violation()
    }

    /// The number of characters of a word or elements of a container.
    pub fn try_size(&self) -> Result<usize> {
        match self.content_ref() {
            DatumContentRef::Word(word) => Ok(word.size()),
            DatumContentRef::List(list) => Ok(list.size()),
            DatumContentRef::Array(array) => Ok(array.size()),
            DatumContentRef::AstNode(node) => Ok(node.count_of_children()),
            _ => Err(self.unsupported("size")),
        }
    }

    /// Panicking variant of [Self::try_size].
    #[track_caller]
    pub fn size(&self) -> usize {
        self.try_size().or_violation()
    }

    pub fn try_is_index_in_range(&self, index: i64) -> Result<bool> {
        match self.content_ref() {
            DatumContentRef::Word(word) => Ok(word.is_index_in_range(index)),
            DatumContentRef::List(list) => Ok(list.is_index_in_range(index)),
            DatumContentRef::Array(array) => Ok(array.is_index_in_range(index)),
            _ => Err(self.unsupported("is_index_in_range")),
        }
    }

    /// Panicking variant of [Self::try_is_index_in_range].
    #[track_caller]
    pub fn is_index_in_range(&self, index: i64) -> bool {
        self.try_is_index_in_range(index).or_violation()
    }

    /// The element at `index`: 1-based for words and lists, origin-based for arrays.
    pub fn try_datum_at_index(&self, index: i64) -> Result<Datum> {
        match self.content_ref() {
            DatumContentRef::Word(word) => word.try_datum_at_index(index),
            DatumContentRef::List(list) => list.try_datum_at_index(index),
            DatumContentRef::Array(array) => array.try_datum_at_index(index),
            _ => Err(self.unsupported("datum_at_index")),
        }
    }

    /// Panicking variant of [Self::try_datum_at_index].
    #[track_caller]
    pub fn datum_at_index(&self, index: i64) -> Datum {
        self.try_datum_at_index(index).or_violation()
    }

    /// The first character of a word or element of a list. The first of an array is its origin,
    /// and the first of an AST node is `nothing`.
    pub fn try_first(&self) -> Result<Datum> {
        match self.content_ref() {
            DatumContentRef::Word(word) => word.try_first(),
            DatumContentRef::List(list) => list.try_first(),
            DatumContentRef::Array(array) => Ok(array.first()),
            DatumContentRef::AstNode(_) => Ok(Datum::nothing()),
            _ => Err(self.unsupported("first")),
        }
    }

    /// Panicking variant of [Self::try_first].
    #[track_caller]
    pub fn first(&self) -> Datum {
        self.try_first().or_violation()
    }

    pub fn try_last(&self) -> Result<Datum> {
        match self.content_ref() {
            DatumContentRef::Word(word) => word.try_last(),
            DatumContentRef::List(list) => list.try_last(),
            DatumContentRef::Array(array) => array.try_last(),
            _ => Err(self.unsupported("last")),
        }
    }

    /// Panicking variant of [Self::try_last].
    #[track_caller]
    pub fn last(&self) -> Datum {
        self.try_last().or_violation()
    }

    /// Everything but the first character or element. The result shares its cells with `self`
    /// when `self` is a list.
    pub fn try_butfirst(&self) -> Result<Datum> {
        match self.content_ref() {
            DatumContentRef::Word(word) => word.try_butfirst(),
            DatumContentRef::List(list) => list.try_butfirst(),
            DatumContentRef::Array(array) => array.try_butfirst(),
            _ => Err(self.unsupported("butfirst")),
        }
    }

    /// Panicking variant of [Self::try_butfirst].
    #[track_caller]
    pub fn butfirst(&self) -> Datum {
        self.try_butfirst().or_violation()
    }

    /// Everything but the last character or element. The result is always a copy.
    pub fn try_butlast(&self) -> Result<Datum> {
        match self.content_ref() {
            DatumContentRef::Word(word) => word.try_butlast(),
            DatumContentRef::List(list) => list.try_butlast(),
            DatumContentRef::Array(array) => array.try_butlast(),
            _ => Err(self.unsupported("butlast")),
        }
    }

    /// Panicking variant of [Self::try_butlast].
    #[track_caller]
    pub fn butlast(&self) -> Datum {
        self.try_butlast().or_violation()
    }

    /// Replaces the element at `index` in place.
    pub fn try_set_item(&self, index: i64, value: Datum) -> Result<()> {
        match self.content_ref() {
            DatumContentRef::List(list) => list.try_set_item(index, value),
            DatumContentRef::Array(array) => array.try_set_item(index, value),
            _ => Err(self.unsupported("set_item")),
        }
    }

    /// Panicking variant of [Self::try_set_item].
    #[track_caller]
    pub fn set_item(&self, index: i64, value: Datum) {
        self.try_set_item(index, value).or_violation()
    }

    /// Replaces the first element in place.
    pub fn try_set_first_item(&self, value: Datum) -> Result<()> {
        match self.content_ref() {
            DatumContentRef::List(list) => list.try_set_first_item(value),
            DatumContentRef::Array(array) => array.try_set_first_item(value),
            _ => Err(self.unsupported("set_first_item")),
        }
    }

    /// Panicking variant of [Self::try_set_first_item].
    #[track_caller]
    pub fn set_first_item(&self, value: Datum) {
        self.try_set_first_item(value).or_violation()
    }

    /// Replaces everything but the first element in place with the content of `value`, which
    /// must be of the same variant as `self`.
    pub fn try_set_butfirst_item(&self, value: &Datum) -> Result<()> {
        match self.content_ref() {
            DatumContentRef::List(list) => list.try_set_butfirst_item(value),
            DatumContentRef::Array(array) => array.try_set_butfirst_item(value),
            _ => Err(self.unsupported("set_butfirst_item")),
        }
    }

    /// Panicking variant of [Self::try_set_butfirst_item].
    #[track_caller]
    pub fn set_butfirst_item(&self, value: &Datum) {
        self.try_set_butfirst_item(value).or_violation()
    }

    /// Whether `needle` appears in `self`. Containers are searched recursively for the very
    /// same datum, while words match any word they contain as a substring. Each container is
    /// visited at most once, so searching a self-referential structure terminates.
    pub fn try_contains_datum(&self, needle: &Datum, ignore_case: bool) -> Result<bool> {
        match self.tag() {
            DatumTag::Word | DatumTag::List | DatumTag::Array => {
                let mut visited = Vec::new();
                Ok(contains_datum(self, needle, ignore_case, &mut visited))
            }
            _ => Err(self.unsupported("contains_datum")),
        }
    }

    /// Panicking variant of [Self::try_contains_datum].
    #[track_caller]
    pub fn contains_datum(&self, needle: &Datum, ignore_case: bool) -> bool {
        self.try_contains_datum(needle, ignore_case).or_violation()
    }

    /// Whether an element of `self` is structurally equal to `value`. For words, whether `value`
    /// is a substring.
    pub fn try_is_member(&self, value: &Datum, ignore_case: bool) -> Result<bool> {
        match self.content_ref() {
            DatumContentRef::Word(word) => {
                Ok(value.as_word().is_some_and(|v| word.contains(v, ignore_case)))
            }
            DatumContentRef::List(list) => Ok(list.is_member(value, ignore_case)),
            DatumContentRef::Array(array) => Ok(array.is_member(value, ignore_case)),
            _ => Err(self.unsupported("is_member")),
        }
    }

    /// Panicking variant of [Self::try_is_member].
    #[track_caller]
    pub fn is_member(&self, value: &Datum, ignore_case: bool) -> bool {
        self.try_is_member(value, ignore_case).or_violation()
    }

    /// The portion of `self` starting at the first element equal to `value`, or an empty datum
    /// of the same variant if there is none. The portion of a list shares its cells with `self`.
    pub fn try_from_member(&self, value: &Datum, ignore_case: bool) -> Result<Datum> {
        match self.content_ref() {
            DatumContentRef::Word(word) => {
                let needle = value.try_decode::<WordBody>()?;
                Ok(word.from_member(needle, ignore_case))
            }
            DatumContentRef::List(list) => Ok(list.from_member(value, ignore_case)),
            DatumContentRef::Array(array) => Ok(array.from_member(value, ignore_case)),
            _ => Err(self.unsupported("from_member")),
        }
    }

    /// Panicking variant of [Self::try_from_member].
    #[track_caller]
    pub fn from_member(&self, value: &Datum, ignore_case: bool) -> Datum {
        self.try_from_member(value, ignore_case).or_violation()
    }

    /// Renders this datum without the outer delimiters of a list or an array, as `PRINT` does.
    pub fn print_value(&self, opts: PrintOptions) -> String {
        Printer::new().print_value(self, opts)
    }

    /// Renders this datum with the outer delimiters of a list or an array, as `SHOW` does.
    pub fn show_value(&self, opts: PrintOptions) -> String {
        Printer::new().show_value(self, opts)
    }
}

fn contains_datum(
    haystack: &Datum,
    needle: &Datum,
    ignore_case: bool,
    visited: &mut Vec<usize>,
) -> bool {
    match haystack.content_ref() {
        DatumContentRef::Word(word) => needle
            .as_word()
            .is_some_and(|needle| word.contains(needle, ignore_case)),
        DatumContentRef::List(_) | DatumContentRef::Array(_) => {
            if visited.contains(&haystack.id()) {
                return false;
            }
            visited.push(haystack.id());

            haystack.cursor().any(|elt| {
                elt.phys_eq(needle) || contains_datum(&elt, needle, ignore_case, visited)
            })
        }
        _ => false,
    }
}

impl Default for Datum {
    fn default() -> Self {
        Datum::nothing()
    }
}

impl From<bool> for Datum {
    fn from(value: bool) -> Self {
        Datum::from_bool(value)
    }
}

impl From<&str> for Datum {
    fn from(text: &str) -> Self {
        Datum::from_text(text)
    }
}

impl From<String> for Datum {
    fn from(text: String) -> Self {
        Datum::from_text(text)
    }
}

impl From<f64> for Datum {
    fn from(number: f64) -> Self {
        Datum::from_number(number)
    }
}

// A `Datum` is a reference-counted pointer in disguise: cloning it must increment the reference
// count of the block.
impl Clone for Datum {
    fn clone(&self) -> Self {
        let count = &self.header().ref_count;
        count.set(count.get() + 1);
        Datum(self.0)
    }
}

impl Drop for Datum {
    fn drop(&mut self) {
        let header = self.header();
        let count = header.ref_count.get() - 1;
        header.ref_count.set(count);

        if count == 0 && header.destroyable {
            // Safety: the count dropped to zero, so this is the last handle to the block, which
            // is never used again.
            unsafe { free(self.0) }
        }
    }
}

/// Drops the body of a block and deallocates it.
///
/// # Safety
///
/// `ptr` must point to a live block allocated by [Datum::encode] which isn't referenced anymore.
unsafe fn free(ptr: NonNull<DatumHeader>) {
    unsafe fn free_as<T: DatumBody>(ptr: NonNull<DatumHeader>) {
        drop(Box::from_raw(ptr.cast::<DatumBlock<T>>().as_ptr()));
    }

    match ptr.as_ref().tag {
        DatumTag::Nothing => free_as::<NothingBody>(ptr),
        DatumTag::Word => free_as::<WordBody>(ptr),
        DatumTag::List => free_as::<ListBody>(ptr),
        DatumTag::ListCell => free_as::<CellBody>(ptr),
        DatumTag::Array => free_as::<ArrayBody>(ptr),
        DatumTag::AstNode => free_as::<AstNodeBody>(ptr),
        DatumTag::Procedure => free_as::<ProcedureBody>(ptr),
        DatumTag::Error => free_as::<ErrorBody>(ptr),
    }

    node_freed();
    increment!("datum::freed");
}

/// Structural equality, case-sensitive for words.
impl PartialEq for Datum {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other, false)
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.show_value(PrintOptions::default()))
    }
}

impl fmt::Debug for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag() {
            DatumTag::Nothing => f.write_str("nothing"),
            tag => write!(
                f,
                "{tag}({})",
                self.show_value(PrintOptions::full().with_depth_limit(8))
            ),
        }
    }
}
