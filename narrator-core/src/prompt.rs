//! Instructions sent to the text model.

use crate::model::{DailyData, WeatherFacts};

const CURRENT_PREAMBLE: &str = "Actúa como un meteorólogo carismático y creativo para 'eltiempo.ai'. \
     Transforma datos técnicos en una narrativa breve (40-50 palabras).";

const DAILY_PREAMBLE: &str = "Actúa como un meteorólogo carismático para 'eltiempo.ai'. \
     Crea una narrativa breve (30-40 palabras) sobre la previsión del tiempo.";

/// Prompt for the current-weather narrative of `city`.
pub fn current_weather_prompt(city: &str, facts: &WeatherFacts, tone: &str) -> String {
    format!(
        "{CURRENT_PREAMBLE}\n\
         **Tono a utilizar**: {tone}\n\
         Basado en los siguientes datos para {city}:\n\
         - Condición: {description}, Temperatura: {temp}°C.\n\
         Crea el pronóstico narrativo. Sé conciso y no repitas el nombre de la ciudad.\n",
        description = facts.description,
        temp = facts.temperature_c,
    )
}

/// Prompt for a single forecasted day. The icon code is only a hint for the model.
pub fn daily_prompt(daily: &DailyData, tone: &str) -> String {
    format!(
        "{DAILY_PREAMBLE}\n\
         **Tono a utilizar**: {tone}\n\
         La previsión para el próximo **{day}** indica una temperatura aproximada de **{temp}°C**.\n\
         El código interno del icono del tiempo es '{icon}'. Usa este código para inferir si estará \
         soleado, nublado, lluvioso, etc., pero **nunca menciones el código en tu respuesta final**.\n\
         Crea la narrativa para ese día futuro. Sé conciso y directo.\n",
        day = daily.day,
        temp = daily.temp,
        icon = daily.icon,
    )
}
