//! crates/praktika_core/src/forms.rs
//!
//! The concrete step tables for each submission flow. Pure data: the
//! machine in [`crate::workflow`] interprets them.

use crate::workflow::{FieldKind, FieldSpec, Requirement, StepSpec, SubmissionWorkflow};

const ROLE_STEP: &[FieldSpec] = &[FieldSpec {
    name: "role",
    label: "Role",
    requirement: Requirement::Required,
    kind: FieldKind::Text,
}];

const BASIC_INFO_STEP: &[FieldSpec] = &[
    FieldSpec {
        name: "name",
        label: "Name",
        requirement: Requirement::RequiredUnless {
            field: "role",
            is: "organization",
        },
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "companyName",
        label: "Organization name",
        requirement: Requirement::RequiredWhen {
            field: "role",
            is_any_of: &["organization"],
        },
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "email",
        label: "Email address",
        requirement: Requirement::Required,
        kind: FieldKind::Email,
    },
    FieldSpec {
        name: "password",
        label: "Password",
        requirement: Requirement::Required,
        kind: FieldKind::Password { min_len: 6 },
    },
    FieldSpec {
        name: "confirmPassword",
        label: "Password confirmation",
        requirement: Requirement::Required,
        kind: FieldKind::Confirmation { of: "password" },
    },
];

const DETAILS_STEP: &[FieldSpec] = &[
    // Student details
    FieldSpec {
        name: "university",
        label: "University",
        requirement: Requirement::RequiredWhen {
            field: "role",
            is_any_of: &["student"],
        },
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "studentId",
        label: "Student ID",
        requirement: Requirement::Optional,
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "fieldOfStudy",
        label: "Field of study",
        requirement: Requirement::RequiredWhen {
            field: "role",
            is_any_of: &["student"],
        },
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "yearOfStudy",
        label: "Year of study",
        requirement: Requirement::Optional,
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "phone",
        label: "Phone number",
        requirement: Requirement::Optional,
        kind: FieldKind::Text,
    },
    // Organization details
    FieldSpec {
        name: "industry",
        label: "Industry",
        requirement: Requirement::RequiredWhen {
            field: "role",
            is_any_of: &["organization"],
        },
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "companySize",
        label: "Company size",
        requirement: Requirement::Optional,
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "foundedYear",
        label: "Founded year",
        requirement: Requirement::Optional,
        kind: FieldKind::Integer,
    },
    FieldSpec {
        name: "contactPerson",
        label: "Contact person",
        requirement: Requirement::Optional,
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "contactPhone",
        label: "Contact phone",
        requirement: Requirement::Optional,
        kind: FieldKind::Text,
    },
    // Shared by organizations and universities
    FieldSpec {
        name: "description",
        label: "Description",
        requirement: Requirement::RequiredWhen {
            field: "role",
            is_any_of: &["organization", "university"],
        },
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "location",
        label: "Location",
        requirement: Requirement::RequiredWhen {
            field: "role",
            is_any_of: &["organization", "university"],
        },
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "website",
        label: "Website",
        requirement: Requirement::Optional,
        kind: FieldKind::Text,
    },
    // University details
    FieldSpec {
        name: "establishedYear",
        label: "Established year",
        requirement: Requirement::Optional,
        kind: FieldKind::Integer,
    },
    FieldSpec {
        name: "studentCount",
        label: "Student count",
        requirement: Requirement::Optional,
        kind: FieldKind::Integer,
    },
    FieldSpec {
        name: "facultyCount",
        label: "Faculty count",
        requirement: Requirement::Optional,
        kind: FieldKind::Integer,
    },
];

/// The three-step account registration flow: role choice, credentials,
/// role-specific details.
pub const REGISTRATION_STEPS: &[StepSpec] = &[
    StepSpec {
        title: "Choose Role",
        fields: ROLE_STEP,
    },
    StepSpec {
        title: "Basic Information",
        fields: BASIC_INFO_STEP,
    },
    StepSpec {
        title: "Details",
        fields: DETAILS_STEP,
    },
];

/// The single-step internship application form.
pub const APPLICATION_STEPS: &[StepSpec] = &[StepSpec {
    title: "Application",
    fields: &[
        FieldSpec {
            name: "coverLetter",
            label: "Cover letter",
            requirement: Requirement::Required,
            kind: FieldKind::Text,
        },
        FieldSpec {
            name: "whyInterested",
            label: "Why you are interested",
            requirement: Requirement::Required,
            kind: FieldKind::Text,
        },
        FieldSpec {
            name: "relevantExperience",
            label: "Relevant experience",
            requirement: Requirement::Optional,
            kind: FieldKind::Text,
        },
        FieldSpec {
            name: "availability",
            label: "Availability",
            requirement: Requirement::Optional,
            kind: FieldKind::Text,
        },
        FieldSpec {
            name: "additionalInfo",
            label: "Additional information",
            requirement: Requirement::Optional,
            kind: FieldKind::Text,
        },
    ],
}];

/// The single-step internship posting form used by organizations.
pub const POSTING_STEPS: &[StepSpec] = &[StepSpec {
    title: "Internship Details",
    fields: &[
        FieldSpec {
            name: "title",
            label: "Title",
            requirement: Requirement::Required,
            kind: FieldKind::Text,
        },
        FieldSpec {
            name: "description",
            label: "Description",
            requirement: Requirement::Required,
            kind: FieldKind::Text,
        },
        FieldSpec {
            name: "location",
            label: "Location",
            requirement: Requirement::Required,
            kind: FieldKind::Text,
        },
        FieldSpec {
            name: "duration",
            label: "Duration",
            requirement: Requirement::Optional,
            kind: FieldKind::Text,
        },
        FieldSpec {
            name: "spotsAvailable",
            label: "Spots available",
            requirement: Requirement::Required,
            kind: FieldKind::Integer,
        },
        FieldSpec {
            name: "requirements",
            label: "Requirements",
            requirement: Requirement::Optional,
            kind: FieldKind::List,
        },
        FieldSpec {
            name: "responsibilities",
            label: "Responsibilities",
            requirement: Requirement::Optional,
            kind: FieldKind::List,
        },
    ],
}];

/// A fresh registration workflow.
pub fn registration() -> SubmissionWorkflow {
    SubmissionWorkflow::new(REGISTRATION_STEPS)
}

/// A fresh application workflow for one internship, owned by one student.
pub fn application(student_id: i64, internship_id: i64) -> SubmissionWorkflow {
    SubmissionWorkflow::new(APPLICATION_STEPS)
        .with_context("studentId", crate::domain::FieldValue::Number(student_id))
        .with_context(
            "internshipId",
            crate::domain::FieldValue::Number(internship_id),
        )
}

/// A fresh posting workflow owned by one organization.
pub fn internship_posting(organization_id: i64) -> SubmissionWorkflow {
    SubmissionWorkflow::new(POSTING_STEPS).with_context(
        "organizationId",
        crate::domain::FieldValue::Number(organization_id),
    )
}
