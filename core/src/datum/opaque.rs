//! Datums carried, but not interpreted, by this crate: procedures and Logo-level errors.

use std::{any::Any, fmt, rc::Rc};

use crate::datum::Datum;

/// A procedure defined by the evaluator. The payload is type-erased, since procedures are only
/// meaningful to the evaluator which created them.
#[derive(Clone)]
pub struct ProcedureBody {
    payload: Rc<dyn Any>,
}

impl ProcedureBody {
    pub fn new<T: Any>(payload: T) -> Self {
        ProcedureBody {
            payload: Rc::new(payload),
        }
    }

    pub fn payload(&self) -> &Rc<dyn Any> {
        &self.payload
    }

    /// Returns the payload if it's a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref()
    }
}

impl fmt::Debug for ProcedureBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("#<procedure>")
    }
}

/// An error raised by a Logo program, as reported by the evaluator.
#[derive(Debug)]
pub struct ErrorBody {
    code: i32,
    text: Datum,
    tag: Datum,
}

impl ErrorBody {
    /// A new error. `tag` is the tag of a `THROW`, or `nothing` for errors raised by primitives.
    pub fn new(code: i32, text: Datum, tag: Datum) -> Self {
        ErrorBody { code, text, tag }
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn text(&self) -> &Datum {
        &self.text
    }

    pub fn tag(&self) -> &Datum {
        &self.tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Body {
        arity: usize,
    }

    #[test]
    fn procedure_payload() {
        let proc = Datum::new(ProcedureBody::new(Body { arity: 2 }));

        assert!(proc.is_procedure());
        assert_eq!(
            proc.procedure().downcast_ref::<Body>().map(|b| b.arity),
            Some(2)
        );
        assert!(proc.procedure().downcast_ref::<String>().is_none());
        // clones of the body share the payload
        let body = proc.procedure().clone();
        assert!(Rc::ptr_eq(body.payload(), proc.procedure().payload()));
        // procedures are only equal to themselves
        assert!(proc.is_equal(&proc.clone(), false));
        assert!(!proc.is_equal(&Datum::new(ProcedureBody::new(Body { arity: 2 })), false));
    }

    #[test]
    fn error_fields() {
        let err = Datum::new_error(7, Datum::from_text("not enough inputs"), Datum::nothing());

        assert_eq!(err.error().code(), 7);
        assert!(err.error().tag().is_nothing());
        assert_eq!(err.to_string(), "not enough inputs");
    }
}
