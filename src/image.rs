//! The compiled runtime image: a table of function descriptors sharing one
//! contiguous bytecode arena.
//!
//! Built once by [`mshadec::compile`](../../mshadec/fn.compile.html) and
//! immutable afterwards — it may be shared freely across threads for
//! read-only execution (see spec.md §5).

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDescriptor {
    name: String,
    code_offset: usize,
}

impl FunctionDescriptor {
    pub fn new(name: impl Into<String>, code_offset: usize) -> FunctionDescriptor {
        FunctionDescriptor {
            name: name.into(),
            code_offset,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code_offset(&self) -> usize {
        self.code_offset
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeImage {
    functions: Vec<FunctionDescriptor>,
    arena: Vec<u8>,
}

impl RuntimeImage {
    pub fn from_parts(functions: Vec<FunctionDescriptor>, arena: Vec<u8>) -> RuntimeImage {
        RuntimeImage { functions, arena }
    }

    pub fn functions(&self) -> &[FunctionDescriptor] {
        &self.functions
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    pub fn arena_len(&self) -> usize {
        self.arena.len()
    }

    pub fn find(&self, name: &str) -> Option<&FunctionDescriptor> {
        self.functions.iter().find(|f| f.name() == name)
    }

    /// Bytecode for `desc`, running from its entry point to the end of the
    /// arena. The VM stops at the function's own `STOP`, so the slice
    /// extending past the function's actual body is harmless.
    pub(crate) fn code_from(&self, desc: &FunctionDescriptor) -> &[u8] {
        &self.arena[desc.code_offset()..]
    }
}
