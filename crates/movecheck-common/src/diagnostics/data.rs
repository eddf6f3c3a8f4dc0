use super::{DiagnosticCategory, DiagnosticMessage};

pub mod diagnostic_codes {
    pub const REFERENCED_NOT_ACCESSIBLE_FROM_MODULE: u32 = 1001;
    pub const REFERENCED_NOT_ACCESSIBLE_FROM_PRODUCTION_OF_MODULE: u32 = 1002;
    pub const REFERENCED_NOT_ACCESSIBLE_IN_MODULE: u32 = 1003;
    pub const USES_DECLARATION_INACCESSIBLE_AFTER_MOVE: u32 = 1101;
    pub const USES_INTERNAL_INACCESSIBLE_AFTER_MOVE: u32 = 1102;
    pub const SEALED_CLASS_MUST_MOVE_WITH_SUBCLASSES: u32 = 1201;
    pub const SEALED_MEMBER_MUST_MOVE_WITH_PARENT: u32 = 1202;
    pub const SEALED_HIERARCHY_NONE_IN_TARGET: u32 = 1203;
    pub const SEALED_HIERARCHY_STILL_IN_SOURCE: u32 = 1204;
    pub const DECLARATIONS_CLASH: u32 = 1301;
}

pub mod diagnostic_messages {
    use super::{DiagnosticCategory, DiagnosticMessage, diagnostic_codes};

    pub const REFERENCED_NOT_ACCESSIBLE_FROM_MODULE: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::REFERENCED_NOT_ACCESSIBLE_FROM_MODULE,
        category: DiagnosticCategory::Error,
        message: "{0} referenced in {1} will not be accessible from module {2}",
    };
    pub const REFERENCED_NOT_ACCESSIBLE_FROM_PRODUCTION_OF_MODULE: DiagnosticMessage =
        DiagnosticMessage {
            code: diagnostic_codes::REFERENCED_NOT_ACCESSIBLE_FROM_PRODUCTION_OF_MODULE,
            category: DiagnosticCategory::Error,
            message: "{0} referenced in {1} will not be accessible from the production code of module {2}",
        };
    pub const REFERENCED_NOT_ACCESSIBLE_IN_MODULE: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::REFERENCED_NOT_ACCESSIBLE_IN_MODULE,
        category: DiagnosticCategory::Error,
        message: "{0}, referenced in {1}, will not be accessible in module {2}",
    };
    pub const USES_DECLARATION_INACCESSIBLE_AFTER_MOVE: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::USES_DECLARATION_INACCESSIBLE_AFTER_MOVE,
        category: DiagnosticCategory::Error,
        message: "{0} uses {1} which will be inaccessible after move",
    };
    pub const USES_INTERNAL_INACCESSIBLE_AFTER_MOVE: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::USES_INTERNAL_INACCESSIBLE_AFTER_MOVE,
        category: DiagnosticCategory::Error,
        message: "{0} uses internal {1} which will be inaccessible after move",
    };
    pub const SEALED_CLASS_MUST_MOVE_WITH_SUBCLASSES: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::SEALED_CLASS_MUST_MOVE_WITH_SUBCLASSES,
        category: DiagnosticCategory::Error,
        message: "sealed class '{0}' must be moved with all its subclasses",
    };
    pub const SEALED_MEMBER_MUST_MOVE_WITH_PARENT: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::SEALED_MEMBER_MUST_MOVE_WITH_PARENT,
        category: DiagnosticCategory::Error,
        message: "{0} '{1}' must be moved with sealed parent class '{2}' and all its subclasses",
    };
    pub const SEALED_HIERARCHY_NONE_IN_TARGET: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::SEALED_HIERARCHY_NONE_IN_TARGET,
        category: DiagnosticCategory::Error,
        message: "sealed hierarchy of '{0}' would be broken: none of its members reside in package '{1}' of module '{2}'. Hierarchy members: {3}",
    };
    pub const SEALED_HIERARCHY_STILL_IN_SOURCE: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::SEALED_HIERARCHY_STILL_IN_SOURCE,
        category: DiagnosticCategory::Warning,
        message: "moving '{0}' leaves other members of its sealed hierarchy behind in package '{1}' of module '{2}': {3}",
    };
    pub const DECLARATIONS_CLASH: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::DECLARATIONS_CLASH,
        category: DiagnosticCategory::Error,
        message: "following declarations would clash: to move {0} and destination {1} declared in scope {2}",
    };
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    diagnostic_messages::REFERENCED_NOT_ACCESSIBLE_FROM_MODULE,
    diagnostic_messages::REFERENCED_NOT_ACCESSIBLE_FROM_PRODUCTION_OF_MODULE,
    diagnostic_messages::REFERENCED_NOT_ACCESSIBLE_IN_MODULE,
    diagnostic_messages::USES_DECLARATION_INACCESSIBLE_AFTER_MOVE,
    diagnostic_messages::USES_INTERNAL_INACCESSIBLE_AFTER_MOVE,
    diagnostic_messages::SEALED_CLASS_MUST_MOVE_WITH_SUBCLASSES,
    diagnostic_messages::SEALED_MEMBER_MUST_MOVE_WITH_PARENT,
    diagnostic_messages::SEALED_HIERARCHY_NONE_IN_TARGET,
    diagnostic_messages::SEALED_HIERARCHY_STILL_IN_SOURCE,
    diagnostic_messages::DECLARATIONS_CLASH,
];
