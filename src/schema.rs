table! {
    ring_apps (id) {
        id -> Text,
        onesignal_app_id -> Nullable<Text>,
    }
}

table! {
    ring_users (user_id, app_id) {
        user_id -> Text,
        app_id -> Text,
        onesignal_player_id -> Nullable<Text>,
        subscription -> Jsonb,
        created_at -> Timestamptz,
    }
}

table! {
    ring_logs (id) {
        id -> Uuid,
        user_id -> Text,
        app_id -> Text,
        message -> Text,
        url -> Nullable<Text>,
        sent_at -> Timestamptz,
        response_status -> Int4,
    }
}

joinable!(ring_users -> ring_apps (app_id));

allow_tables_to_appear_in_same_query!(ring_apps, ring_logs, ring_users);
