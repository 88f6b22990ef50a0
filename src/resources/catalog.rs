use super::password::hash_plaintext_password;
use super::{Column, DefaultValue, Messages, ResourceSpec, SqlType};

use DefaultValue::{Number, Text};
use SqlType::{BigInt, Date, Numeric, Text as Str};

pub static USERS: ResourceSpec = ResourceSpec {
    path: "users",
    table: "users",
    alias: "u",
    display_columns: "",
    joins: "",
    columns: &[
        Column::required("name", Str),
        Column::required("email", Str),
        Column::required("password_hash", Str),
        Column::defaulted_falsy("role", Str, Text("student")),
        Column::defaulted_falsy("status", Str, Text("active")),
    ],
    order_by: None,
    plan_scoped: false,
    tracks_updated_at: true,
    prepare: Some(hash_plaintext_password),
    messages: Messages {
        not_found: "Usuario no encontrado",
        required: "Nombre, email y contraseña son requeridos",
        created: "Usuario creado exitosamente",
        updated: "Usuario actualizado exitosamente",
        deleted: "Usuario eliminado exitosamente",
        conflict: "El email ya está registrado",
        missing_reference: "El usuario hace referencia a un registro inexistente",
    },
};

pub static RESEARCH_PLANS: ResourceSpec = ResourceSpec {
    path: "research-plans",
    table: "research_plans",
    alias: "rp",
    display_columns: "u_student.name AS student_name, u_advisor.name AS advisor_name",
    joins: "LEFT JOIN users u_student ON rp.student_id = u_student.id \
            LEFT JOIN users u_advisor ON rp.advisor_id = u_advisor.id",
    columns: &[
        Column::required("student_id", BigInt),
        Column::optional("advisor_id", BigInt),
        Column::required("title", Str),
        Column::optional("description", Str),
        Column::defaulted_falsy("status", Str, Text("draft")),
        Column::defaulted_falsy("progress", Numeric, Number(0.0)),
    ],
    order_by: None,
    plan_scoped: false,
    tracks_updated_at: true,
    prepare: None,
    messages: Messages {
        not_found: "Plan de investigación no encontrado",
        required: "ID del estudiante y título son requeridos",
        created: "Plan de investigación creado exitosamente",
        updated: "Plan de investigación actualizado exitosamente",
        deleted: "Plan de investigación eliminado exitosamente",
        conflict: "El plan de investigación ya existe",
        missing_reference: "El estudiante o asesor especificado no existe",
    },
};

pub static SECTIONS: ResourceSpec = ResourceSpec {
    path: "sections",
    table: "sections",
    alias: "s",
    display_columns: "rp.title AS plan_title",
    joins: "JOIN research_plans rp ON s.plan_id = rp.id",
    columns: &[
        Column::required("plan_id", BigInt),
        Column::required("type", Str),
        Column::optional("content", Str),
        Column::defaulted("status", Str, Text("pending")),
        Column::optional("last_review_comment", Str),
    ],
    order_by: None,
    plan_scoped: true,
    tracks_updated_at: true,
    prepare: None,
    messages: Messages {
        not_found: "Sección no encontrada",
        required: "ID del plan y tipo de sección son requeridos",
        created: "Sección creada exitosamente",
        updated: "Sección actualizada exitosamente",
        deleted: "Sección eliminada exitosamente",
        conflict: "La sección ya existe",
        missing_reference: "El plan de investigación especificado no existe",
    },
};

pub static OBJECTIVES: ResourceSpec = ResourceSpec {
    path: "objectives",
    table: "objectives",
    alias: "o",
    display_columns: "rp.title AS plan_title",
    joins: "JOIN research_plans rp ON o.plan_id = rp.id",
    columns: &[
        Column::required("plan_id", BigInt),
        Column::required("type", Str),
        Column::required("description", Str),
    ],
    order_by: None,
    plan_scoped: true,
    tracks_updated_at: false,
    prepare: None,
    messages: Messages {
        not_found: "Objetivo no encontrado",
        required: "ID del plan, tipo y descripción son requeridos",
        created: "Objetivo creado exitosamente",
        updated: "Objetivo actualizado exitosamente",
        deleted: "Objetivo eliminado exitosamente",
        conflict: "El objetivo ya existe",
        missing_reference: "El plan de investigación especificado no existe",
    },
};

pub static HYPOTHESES: ResourceSpec = ResourceSpec {
    path: "hypotheses",
    table: "hypotheses",
    alias: "h",
    display_columns: "rp.title AS plan_title",
    joins: "JOIN research_plans rp ON h.plan_id = rp.id",
    columns: &[
        Column::required("plan_id", BigInt),
        Column::required("type", Str),
        Column::required("description", Str),
    ],
    order_by: None,
    plan_scoped: true,
    tracks_updated_at: false,
    prepare: None,
    messages: Messages {
        not_found: "Hipótesis no encontrada",
        required: "ID del plan, tipo y descripción son requeridos",
        created: "Hipótesis creada exitosamente",
        updated: "Hipótesis actualizada exitosamente",
        deleted: "Hipótesis eliminada exitosamente",
        conflict: "La hipótesis ya existe",
        missing_reference: "El plan de investigación especificado no existe",
    },
};

pub static VARIABLES: ResourceSpec = ResourceSpec {
    path: "variables",
    table: "variables",
    alias: "v",
    display_columns: "rp.title AS plan_title",
    joins: "JOIN research_plans rp ON v.plan_id = rp.id",
    columns: &[
        Column::required("plan_id", BigInt),
        Column::required("name", Str),
        Column::optional("conceptual_definition", Str),
        Column::optional("operational_definition", Str),
    ],
    order_by: None,
    plan_scoped: true,
    tracks_updated_at: false,
    prepare: None,
    messages: Messages {
        not_found: "Variable no encontrada",
        required: "ID del plan y nombre son requeridos",
        created: "Variable creada exitosamente",
        updated: "Variable actualizada exitosamente",
        deleted: "Variable eliminada exitosamente",
        conflict: "La variable ya existe",
        missing_reference: "El plan de investigación especificado no existe",
    },
};

pub static BIBLIOGRAPHY: ResourceSpec = ResourceSpec {
    path: "bibliography",
    table: "bibliography",
    alias: "b",
    display_columns: "rp.title AS plan_title",
    joins: "JOIN research_plans rp ON b.plan_id = rp.id",
    columns: &[
        Column::required("plan_id", BigInt),
        Column::required("citation", Str),
    ],
    order_by: None,
    plan_scoped: true,
    tracks_updated_at: false,
    prepare: None,
    messages: Messages {
        not_found: "Entrada de bibliografía no encontrada",
        required: "ID del plan y cita son requeridos",
        created: "Entrada de bibliografía creada exitosamente",
        updated: "Entrada de bibliografía actualizada exitosamente",
        deleted: "Entrada de bibliografía eliminada exitosamente",
        conflict: "La entrada de bibliografía ya existe",
        missing_reference: "El plan de investigación especificado no existe",
    },
};

pub static ACTIVITIES: ResourceSpec = ResourceSpec {
    path: "activities",
    table: "activities",
    alias: "a",
    display_columns: "rp.title AS plan_title",
    joins: "JOIN research_plans rp ON a.plan_id = rp.id",
    columns: &[
        Column::required("plan_id", BigInt),
        Column::required("activity_name", Str),
        Column::optional("description", Str),
        Column::optional("start_date", Date),
        Column::optional("end_date", Date),
        Column::defaulted_falsy("progress", Numeric, Number(0.0)),
        Column::defaulted_falsy("status", Str, Text("pending")),
    ],
    order_by: None,
    plan_scoped: true,
    tracks_updated_at: false,
    prepare: None,
    messages: Messages {
        not_found: "Actividad no encontrada",
        required: "ID del plan y nombre de actividad son requeridos",
        created: "Actividad creada exitosamente",
        updated: "Actividad actualizada exitosamente",
        deleted: "Actividad eliminada exitosamente",
        conflict: "La actividad ya existe",
        missing_reference: "El plan de investigación especificado no existe",
    },
};

pub static REVIEWS: ResourceSpec = ResourceSpec {
    path: "reviews",
    table: "reviews",
    alias: "r",
    display_columns: "rp.title AS plan_title, u_reviewer.name AS reviewer_name, s.type AS section_type",
    joins: "JOIN research_plans rp ON r.plan_id = rp.id \
            JOIN users u_reviewer ON r.reviewer_id = u_reviewer.id \
            LEFT JOIN sections s ON r.section_id = s.id",
    columns: &[
        Column::required("plan_id", BigInt),
        Column::optional("section_id", BigInt),
        Column::required("reviewer_id", BigInt),
        Column::required("comment", Str),
        Column::defaulted_falsy("status", Str, Text("pending")),
    ],
    order_by: None,
    plan_scoped: true,
    tracks_updated_at: false,
    prepare: None,
    messages: Messages {
        not_found: "Revisión no encontrada",
        required: "ID del plan, revisor y comentario son requeridos",
        created: "Revisión creada exitosamente",
        updated: "Revisión actualizada exitosamente",
        deleted: "Revisión eliminada exitosamente",
        conflict: "La revisión ya existe",
        missing_reference: "El plan, la sección o el revisor especificado no existe",
    },
};

pub static PLAN_HISTORY: ResourceSpec = ResourceSpec {
    path: "plan-history",
    table: "plan_history",
    alias: "ph",
    display_columns: "rp.title AS plan_title, u.name AS user_name",
    joins: "JOIN research_plans rp ON ph.plan_id = rp.id \
            JOIN users u ON ph.user_id = u.id",
    columns: &[
        Column::required("plan_id", BigInt),
        Column::required("user_id", BigInt),
        Column::required("action", Str),
        Column::optional("description", Str),
    ],
    order_by: Some("ph.created_at DESC, ph.id DESC"),
    plan_scoped: true,
    tracks_updated_at: false,
    prepare: None,
    messages: Messages {
        not_found: "Entrada de historial no encontrada",
        required: "ID del plan, usuario y acción son requeridos",
        created: "Entrada de historial creada exitosamente",
        updated: "Entrada de historial actualizada exitosamente",
        deleted: "Entrada de historial eliminada exitosamente",
        conflict: "La entrada de historial ya existe",
        missing_reference: "El plan de investigación o el usuario especificado no existe",
    },
};

/// Every exposed resource, in route registration order
pub static ALL: &[&ResourceSpec] = &[
    &USERS,
    &RESEARCH_PLANS,
    &SECTIONS,
    &OBJECTIVES,
    &HYPOTHESES,
    &VARIABLES,
    &BIBLIOGRAPHY,
    &ACTIVITIES,
    &REVIEWS,
    &PLAN_HISTORY,
];
