//! Diesel schema for volunteering persistence.

diesel::table! {
    /// Registered organizations with their owned task list.
    organizations (id) {
        /// Organization identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 100]
        name -> Varchar,
        /// Contact email.
        email -> Text,
        /// Contact phone number.
        #[max_length = 15]
        phone_number -> Varchar,
        /// Postal address.
        #[max_length = 255]
        address -> Varchar,
        /// Website.
        #[max_length = 255]
        website -> Varchar,
        /// Owned task identifiers in attachment order.
        task_ids -> Array<Uuid>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Registered volunteers.
    volunteers (id) {
        /// Volunteer identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 100]
        name -> Varchar,
        /// Contact email.
        email -> Text,
        /// Contact phone number.
        #[max_length = 15]
        phone_number -> Varchar,
        /// Declared gender.
        #[max_length = 20]
        gender -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tasks posted by organizations.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning organization.
        organization_id -> Uuid,
        /// Title.
        #[max_length = 100]
        title -> Varchar,
        /// Description.
        description -> Text,
        /// Location.
        #[max_length = 100]
        location -> Varchar,
        /// Event date.
        event_date -> Date,
        /// Last day to sign up.
        application_deadline -> Date,
        /// Last day to withdraw a signup.
        cancellation_deadline -> Date,
        /// Administrative cancellation time.
        cancelled_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Volunteer signups for tasks.
    task_signups (id) {
        /// Signup identifier.
        id -> Uuid,
        /// Task signed up for.
        task_id -> Uuid,
        /// Volunteer who signed up.
        volunteer_id -> Uuid,
        /// Signup timestamp.
        signup_date -> Timestamptz,
    }
}
