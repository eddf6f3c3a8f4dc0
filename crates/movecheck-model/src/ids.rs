//! Arena identifiers.
//!
//! Every entity of the project lives in a `Vec` arena owned by `Project`;
//! these newtypes index into those arenas. They are `Copy` and hash cheaply,
//! so checkers pass them around freely and key their visited sets on them.

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
        pub struct $name(pub u32);

        impl $name {
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

define_id!(
    /// A declaration (class, function, property, constructor, ...).
    DeclId
);
define_id!(
    /// A reference occurrence inside source code.
    RefId
);
define_id!(
    /// A source file.
    FileId
);
define_id!(
    /// A directory belonging to exactly one source root.
    DirId
);
define_id!(
    /// A project module.
    ModuleId
);
define_id!(
    /// A library attached to modules.
    LibraryId
);
define_id!(
    /// An SDK order entry (JDK or another platform SDK).
    SdkId
);
define_id!(
    /// An interned type.
    TypeId
);
