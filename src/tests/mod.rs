use super::*;

mod field_discovery;
mod rule_registry;
mod submit_gating;

const NAME_MESSAGE: &str = "Name must be longer than 3 characters and must be letters only";
const EMAIL_MESSAGE: &str = "Please enter a valid email";
const PHONE_MESSAGE: &str = "Please enter a valid phone number";

const SIGNUP_FORM: &str = r#"
    <form id='signup' data-form-validation>
      <div class='row'>
        <label for='name'>Name</label>
        <input id='name' type='text' data-validate-name>
      </div>
      <div class='row'>
        <input id='email' type='email' data-validate-email>
      </div>
      <div class='row'>
        <input id='phone' type='tel' data-validate-phone>
      </div>
      <input id='nickname' type='text'>
      <input id='send' type='submit' value='Send'>
    </form>
    "#;
