diesel::table! {
    officers (id) {
        id -> Integer,
        discord_id -> Text,
        username -> Text,
        hours_on_duty -> Float,
        robberies_handled -> Integer,
        score -> Integer,
        status -> Text,             // active | on_duty | off_duty | suspended
        notes -> Nullable<Text>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    command_logs (id) {
        id -> Integer,
        discord_id -> Text,
        command -> Text,
        username -> Text,
        timestamp -> Timestamp,
    }
}

diesel::table! {
    system_status (id) {
        id -> Integer,
        service -> Text,            // discord_bot, api_server, web_server, ...
        status -> Text,             // online, offline, error, ...
        last_checked -> Timestamp,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    officers,
    command_logs,
    system_status,
);
