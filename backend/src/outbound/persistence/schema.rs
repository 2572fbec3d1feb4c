//! Diesel table definitions; must match `backend/migrations` exactly.

diesel::table! {
    /// Liqueur catalogue, one row per record.
    liqueurs (id) {
        id -> Uuid,
        name -> Varchar,
        degree_of_alcohol -> Float8,
        manufacturing_date -> Timestamptz,
        /// Insertion time; orders listings.
        created_at -> Timestamptz,
    }
}
