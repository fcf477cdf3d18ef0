pub mod auth_handler;
pub mod question_handler;
pub mod result_handler;
pub mod user_handler;

pub use auth_handler::{
    forgot_password, google_login, login, me, register, reset_password, verify_otp,
};
pub use question_handler::{
    create_question, delete_question, get_question, list_questions_admin,
    list_questions_for_subject, submit_answers, update_question,
};
pub use result_handler::{best_score, get_result, my_results, save_result};
pub use user_handler::{
    create_user, delete_user, get_user, health_check, health_check_ready, list_users, update_role,
    update_user,
};
