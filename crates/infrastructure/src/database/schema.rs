// Database schema for the project listings
diesel::table! {
    users (id) {
        id -> Text,                // Subject issued by the auth provider
        name -> Text,
        email -> Text,
        image -> Nullable<Text>,   // Avatar URL
        created_at -> Timestamp,
    }
}

diesel::table! {
    projects (seq) {
        seq -> BigInt,             // Insertion order, tie-break for equal timestamps
        id -> Text,
        title -> Text,
        description -> Text,
        poster_image -> Text,      // Hosted image URL
        github_url -> Text,
        website_url -> Text,
        category -> Text,
        author_id -> Text,
        likes -> BigInt,           // Denormalized count of project_likes rows
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    project_likes (project_id, user_id) {
        project_id -> Text,
        user_id -> Text,
        liked_at -> Timestamp,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, projects, project_likes,);
